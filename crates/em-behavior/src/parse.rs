//! Parsing of tagged free-text oracle responses.
//!
//! Text-backed oracles (scripted mocks, language models) answer with tagged
//! blocks:
//!
//! ```text
//! <ACTION>
//! MOVE UP | MOVE DOWN | MOVE LEFT | MOVE RIGHT | GATHER | WAIT
//! </ACTION>
//!
//! <TRADE_OFFER>
//! offer: 4 energy
//! to: Agent_2
//! </TRADE_OFFER>
//!
//! <DECISION>ACCEPT | REJECT</DECISION>
//! <REASON>free text</REASON>
//! ```
//!
//! Tags are case-sensitive, contents are not.  A `<TRADE_OFFER>` block that
//! lacks either field is ignored in favour of an `<ACTION>` block, if any.
//! Anything else is [`OracleError::Malformed`].

use std::sync::LazyLock;

use em_core::{Direction, Energy};
use regex::Regex;

use crate::{Decision, OracleError, OracleResult, TradeVerdict};

/// Reason reported when a verdict carries no `<REASON>` block.
pub const NO_REASON: &str = "(No explanation provided)";

static TRADE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<TRADE_OFFER>(.*?)</TRADE_OFFER>").expect("static regex"));
static OFFER_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)offer:\s*(\d+)").expect("static regex"));
static TO_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)to:\s*([^\s<]+)").expect("static regex"));
static ACTION_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<ACTION>\s*(.*?)\s*</ACTION>").expect("static regex"));
static DECISION_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<DECISION>\s*(.*?)\s*</DECISION>").expect("static regex"));
static REASON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<REASON>\s*(.*?)\s*</REASON>").expect("static regex"));

/// Parse a tagged action or trade-offer response into a [`Decision`].
pub fn parse_decision(text: &str) -> OracleResult<Decision> {
    if let Some(decision) = parse_trade_block(text)? {
        return Ok(decision);
    }

    let Some(caps) = ACTION_BLOCK.captures(text) else {
        return Err(OracleError::malformed("no <ACTION> or complete <TRADE_OFFER> block", text));
    };
    let action = caps[1].split_whitespace().collect::<Vec<_>>().join(" ").to_ascii_uppercase();

    match action.as_str() {
        "GATHER" => Ok(Decision::Gather),
        "WAIT" => Ok(Decision::Wait),
        other => match other.strip_prefix("MOVE ") {
            Some(dir) => dir
                .parse::<Direction>()
                .map(Decision::move_to)
                .map_err(|e| OracleError::malformed(e.to_string(), text)),
            None => Err(OracleError::malformed(format!("unknown action {other:?}"), text)),
        },
    }
}

fn parse_trade_block(text: &str) -> OracleResult<Option<Decision>> {
    let Some(block) = TRADE_BLOCK.captures(text) else {
        return Ok(None);
    };
    let body = &block[1];
    let (Some(offer), Some(to)) = (OFFER_FIELD.captures(body), TO_FIELD.captures(body)) else {
        return Ok(None);
    };
    let amount: Energy = offer[1]
        .parse()
        .map_err(|_| OracleError::malformed(format!("offer amount {:?} out of range", &offer[1]), text))?;
    Ok(Some(Decision::trade(amount, &to[1])))
}

/// Parse a tagged `<DECISION>` / `<REASON>` response into a [`TradeVerdict`].
pub fn parse_verdict(text: &str) -> OracleResult<TradeVerdict> {
    let Some(caps) = DECISION_BLOCK.captures(text) else {
        return Err(OracleError::malformed("no <DECISION> block", text));
    };
    let accepted = match caps[1].trim().to_ascii_uppercase().as_str() {
        "ACCEPT" => true,
        "REJECT" => false,
        other => return Err(OracleError::malformed(format!("unknown verdict {other:?}"), text)),
    };
    let reason = REASON_BLOCK
        .captures(text)
        .map(|c| c[1].to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| NO_REASON.to_string());
    Ok(TradeVerdict { accepted, reason })
}
