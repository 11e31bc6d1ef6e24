//! Key scripts for headless flights.
//!
//! A script is a comma-separated list of `START-END:KEY+KEY` segments. Keys
//! are held for frames `START..END` (end exclusive). Segments may overlap.

use std::ops::Range;

use aerofighters_input::{Key, KeyState};
use anyhow::{Context, bail};

#[derive(Debug, Clone, PartialEq)]
struct Segment {
    frames: Range<u64>,
    keys: Vec<Key>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyScript {
    segments: Vec<Segment>,
}

impl KeyScript {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut segments = Vec::new();
        for raw in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (range, keys) = raw
                .split_once(':')
                .with_context(|| format!("segment {raw:?} is missing ':'"))?;
            let (start, end) = range
                .split_once('-')
                .with_context(|| format!("range {range:?} must be START-END"))?;
            let start: u64 = start
                .trim()
                .parse()
                .with_context(|| format!("bad start frame in {raw:?}"))?;
            let end: u64 = end
                .trim()
                .parse()
                .with_context(|| format!("bad end frame in {raw:?}"))?;
            if end < start {
                bail!("segment {raw:?} ends before it starts");
            }
            let keys = keys
                .split('+')
                .map(|k| k.parse::<Key>().map_err(anyhow::Error::from))
                .collect::<anyhow::Result<Vec<_>>>()?;
            segments.push(Segment {
                frames: start..end,
                keys,
            });
        }
        Ok(Self { segments })
    }

    /// Keys held on `frame`.
    pub fn keys_at(&self, frame: u64) -> KeyState {
        self.segments
            .iter()
            .filter(|s| s.frames.contains(&frame))
            .flat_map(|s| s.keys.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_holds_nothing() {
        let script = KeyScript::parse("").unwrap();
        assert!(script.keys_at(0).is_empty());
    }

    #[test]
    fn overlapping_segments_combine() {
        let script = KeyScript::parse("0-10:W, 5-20:Space+D").unwrap();
        let keys = script.keys_at(7);
        assert!(keys.is_held(Key::W));
        assert!(keys.is_held(Key::Space));
        assert!(keys.is_held(Key::D));

        let keys = script.keys_at(10);
        assert!(!keys.is_held(Key::W));
        assert!(keys.is_held(Key::D));
        assert!(script.keys_at(20).is_empty());
    }

    #[test]
    fn bad_segments_rejected() {
        assert!(KeyScript::parse("0-10").is_err());
        assert!(KeyScript::parse("10-0:W").is_err());
        assert!(KeyScript::parse("a-3:W").is_err());
        assert!(KeyScript::parse("0-3:Banana").is_err());
    }
}
