//! Frame log replay against the simulated bus.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use voltio_config::Patch;
use voltio_control::dispatch;
use voltio_synth::{ModuleMap, Synth};

use crate::sim::SimBus;

#[derive(Args)]
pub struct ReplayArgs {
    /// Frame log: one frame per line as whitespace-separated hex bytes.
    /// Text after '#' is a comment.
    #[arg(value_name = "LOG")]
    input: PathBuf,

    /// Apply a patch file before replaying
    #[arg(long, value_name = "FILE")]
    patch: Option<PathBuf>,

    /// Include the patch's own register writes in the output
    #[arg(long)]
    show_patch_writes: bool,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading frame log '{}'", args.input.display()))?;

    let map = ModuleMap::default();
    let mut synth = Synth::new(SimBus::new(&map), map);

    if let Some(path) = &args.patch {
        let patch =
            Patch::load(path).with_context(|| format!("loading patch '{}'", path.display()))?;
        patch.apply(&mut synth);
        tracing::info!(patch = %path.display(), "patch applied");
        if !args.show_patch_writes {
            synth.bus_mut().clear_journal();
        }
    }

    let mut frames = 0usize;
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let frame = parse_frame(line).with_context(|| format!("line {}", lineno + 1))?;
        dispatch(&mut synth, &frame).with_context(|| format!("line {}", lineno + 1))?;
        frames += 1;
    }

    let writes = synth.bus().writes();
    println!("{frames} frames, {} register writes", writes.len());
    for w in writes {
        println!("{:#010X} +{:<2} <- {:#010X}", w.base, w.offset, w.value);
    }

    let held = synth.pool().assigned_count();
    if held > 0 {
        println!("{held} channels still held at end of log");
    }
    Ok(())
}

fn parse_frame(line: &str) -> Result<Vec<u8>> {
    line.split_whitespace()
        .map(|tok| u8::from_str_radix(tok, 16).with_context(|| format!("bad hex byte '{tok}'")))
        .collect()
}
