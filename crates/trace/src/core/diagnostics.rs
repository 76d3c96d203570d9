//! Extracts the human-readable diagnostics of a run: the collector's fault
//! lines verbatim, plus a synthesized failure entry for the outermost call so
//! callers can always tell "succeeded" apart from "failed for an unknown
//! reason".

use alloy::primitives::U256;
use optrace_common::utils::strings::decode_hex;
use tracing::debug;

use crate::interfaces::RawCollectorOutput;

// 0x08c379a0 == Error(String)
const ERROR_FUNCTION_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

/// Assembles the diagnostics for one run, in emission order. When the
/// outermost call failed, at least one entry describing the failure is
/// guaranteed, with the decoded revert reason when one exists.
pub(crate) fn collect_diagnostics(raw: &RawCollectorOutput) -> Vec<String> {
    let mut diagnostics = raw.debug.clone();

    if raw.failed {
        let reason = raw
            .output
            .as_deref()
            .and_then(|output| decode_hex(output).ok())
            .and_then(|bytes| decode_revert_reason(&bytes));

        let entry = match (reason, raw.error.as_deref()) {
            (Some(reason), _) => format!("execution reverted: {reason}"),
            (None, Some(error)) => format!("execution failed: {error}"),
            (None, None) => "execution failed with no revert reason".to_string(),
        };
        debug!("outermost simulated call failed: {entry}");
        diagnostics.push(entry);
    }

    diagnostics
}

/// Decodes an `Error(string)` revert payload into its reason string, if the
/// returndata carries one.
fn decode_revert_reason(output: &[u8]) -> Option<String> {
    if output.len() < 68 || output[..4] != ERROR_FUNCTION_SELECTOR {
        return None;
    }

    // selector, then abi-encoded (offset, length, bytes)
    let length: usize = U256::try_from_be_slice(&output[36..68])?.try_into().ok()?;
    let end = 68usize.checked_add(length)?;
    if output.len() < end {
        return None;
    }

    String::from_utf8(output[68..end].to_vec()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::RawCollectorOutput;
    use optrace_common::utils::strings::encode_hex;

    /// abi-encode `Error(string)` around the given reason
    fn revert_payload(reason: &str) -> String {
        let mut bytes = ERROR_FUNCTION_SELECTOR.to_vec();
        bytes.extend_from_slice(&U256::from(0x20).to_be_bytes::<32>());
        bytes.extend_from_slice(&U256::from(reason.len()).to_be_bytes::<32>());
        bytes.extend_from_slice(reason.as_bytes());
        bytes.resize(4 + 64 + reason.len().div_ceil(32) * 32, 0);
        format!("0x{}", encode_hex(&bytes))
    }

    fn raw_output(failed: bool, error: Option<&str>, output: Option<String>) -> RawCollectorOutput {
        RawCollectorOutput {
            events: vec![],
            logs: vec![],
            debug: vec![],
            failed,
            error: error.map(str::to_string),
            output,
        }
    }

    #[test]
    fn test_successful_run_has_no_synthesized_entry() {
        let diagnostics = collect_diagnostics(&raw_output(false, None, Some("0x".to_string())));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_revert_reason_is_decoded() {
        let raw = raw_output(
            true,
            Some("execution reverted"),
            Some(revert_payload("AA23 reverted: not enough funds")),
        );
        let diagnostics = collect_diagnostics(&raw);
        assert_eq!(
            diagnostics,
            vec!["execution reverted: AA23 reverted: not enough funds".to_string()]
        );
    }

    #[test]
    fn test_failure_without_reason_falls_back_to_node_error() {
        let raw = raw_output(true, Some("out of gas"), Some("0x".to_string()));
        assert_eq!(collect_diagnostics(&raw), vec!["execution failed: out of gas".to_string()]);
    }

    #[test]
    fn test_failure_without_any_detail_still_yields_an_entry() {
        let raw = raw_output(true, None, None);
        assert_eq!(
            collect_diagnostics(&raw),
            vec!["execution failed with no revert reason".to_string()]
        );
    }

    #[test]
    fn test_fault_lines_are_preserved_verbatim_and_first() {
        let mut raw = raw_output(true, Some("execution reverted"), None);
        raw.debug = vec!["fault depth=2 gas=100 cost=3 err=execution reverted".to_string()];

        let diagnostics = collect_diagnostics(&raw);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0], "fault depth=2 gas=100 cost=3 err=execution reverted");
    }

    #[test]
    fn test_decode_revert_reason_rejects_short_or_foreign_payloads() {
        assert_eq!(decode_revert_reason(&[0x08, 0xc3]), None);
        // a panic(uint256) payload is not an Error(string)
        let mut panic_payload = vec![0x4e, 0x48, 0x7b, 0x71];
        panic_payload.resize(68, 0);
        assert_eq!(decode_revert_reason(&panic_payload), None);
    }

    #[test]
    fn test_decode_revert_reason_rejects_truncated_string() {
        let mut bytes = ERROR_FUNCTION_SELECTOR.to_vec();
        bytes.extend_from_slice(&U256::from(0x20).to_be_bytes::<32>());
        bytes.extend_from_slice(&U256::from(64).to_be_bytes::<32>());
        bytes.extend_from_slice(b"short");
        assert_eq!(decode_revert_reason(&bytes), None);
    }
}
