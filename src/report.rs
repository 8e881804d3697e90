use std::io::Write;

use anyhow::{Context, Result};

use crate::matching::Matching;
use crate::network::model::FlowNetwork;

/// Renders a matching against the network it came from: one
/// `"<rightLabel> / <leftLabel>"` line per pair in ascending right-id
/// order, then a `"<count> total matches"` trailer.
pub struct MatchingWriter;

impl MatchingWriter {
    pub fn write(network: &FlowNetwork, matching: &Matching, out: &mut impl Write) -> Result<()> {
        for (right, left) in matching.pairs() {
            writeln!(out, "{} / {}", network.label(right), network.label(left))
                .context("write matched pair")?;
        }
        writeln!(out, "{} total matches", matching.len()).context("write match count")?;
        Ok(())
    }

    pub fn to_text(network: &FlowNetwork, matching: &Matching) -> Result<String> {
        let mut buffer = Vec::new();
        Self::write(network, matching, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
