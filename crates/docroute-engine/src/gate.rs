// SPDX-License-Identifier: MIT
//
// Firmware version gating for the POS print agent.
//
// Decides whether a print attempt may proceed against the reported agent
// version. Missing information fails open — printing is never blocked by
// an unreachable version endpoint.

use tracing::{debug, warn};

use docroute_core::types::PrinterVersionInfo;

/// Outcome of evaluating the printer version against the latest release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Up to date (or no information available) — print normally.
    Proceed,
    /// An optional update exists. Warn the user once per host lifetime,
    /// then proceed.
    WarnOnce,
    /// A mandatory update is pending — the job must not be sent.
    Block,
}

/// Evaluate the gate for one print attempt.
///
/// `warning_already_sent` is the persisted one-shot flag; when set, an
/// optional update no longer produces a warning.
pub fn evaluate(info: Option<&PrinterVersionInfo>, warning_already_sent: bool) -> GateDecision {
    let Some(info) = info else {
        debug!("no printer version info — gate fails open");
        return GateDecision::Proceed;
    };

    if !info.update_available() {
        return GateDecision::Proceed;
    }

    if info.mandatory_version {
        warn!(
            current = %info.current_version,
            latest = %info.latest_version,
            "mandatory printer update pending — blocking print"
        );
        return GateDecision::Block;
    }

    if warning_already_sent {
        debug!("optional update pending, warning already sent previously");
        GateDecision::Proceed
    } else {
        GateDecision::WarnOnce
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(current: &str, latest: &str, mandatory: bool) -> PrinterVersionInfo {
        PrinterVersionInfo {
            current_version: current.into(),
            latest_version: latest.into(),
            mandatory_version: mandatory,
        }
    }

    #[test]
    fn absent_info_proceeds() {
        assert_eq!(evaluate(None, false), GateDecision::Proceed);
    }

    #[test]
    fn mandatory_gap_blocks() {
        assert_eq!(
            evaluate(Some(&info("1", "2", true)), false),
            GateDecision::Block
        );
        // The warning flag has no bearing on mandatory updates.
        assert_eq!(
            evaluate(Some(&info("1", "2", true)), true),
            GateDecision::Block
        );
    }

    #[test]
    fn optional_gap_warns_once() {
        assert_eq!(
            evaluate(Some(&info("1", "2", false)), false),
            GateDecision::WarnOnce
        );
        assert_eq!(
            evaluate(Some(&info("1", "2", false)), true),
            GateDecision::Proceed
        );
    }

    #[test]
    fn up_to_date_proceeds_silently() {
        assert_eq!(
            evaluate(Some(&info("2.0", "2.0", true)), false),
            GateDecision::Proceed
        );
        // Agent ahead of the published latest is also fine.
        assert_eq!(
            evaluate(Some(&info("2.1", "2.0", false)), false),
            GateDecision::Proceed
        );
    }
}
