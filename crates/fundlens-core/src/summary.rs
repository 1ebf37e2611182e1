//! Flat summary of a fund document.
//!
//! After every accepted edit the surrounding system refreshes a flat record
//! used for listing and search. The projection reads through both field
//! shapes, so it works on trees from any extraction engine.

use serde::{Deserialize, Serialize};

use crate::field::resolve_value;
use crate::node::{Node, Scalar};

/// Fee fields projected from the `fees` section.
pub const FEE_KEYS: [&str; 4] = [
    "management_fee",
    "subscription_fee",
    "redemption_fee",
    "switching_fee",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundSummary {
    pub fund_name: Option<Node>,
    pub fund_code: Option<Node>,
    pub management_company: Option<Node>,
    pub custodian_bank: Option<Node>,
    pub management_fee: Option<String>,
    pub subscription_fee: Option<String>,
    pub redemption_fee: Option<String>,
    pub switching_fee: Option<String>,
    pub portfolio: Vec<Node>,
    pub nav_history: Vec<Node>,
    pub dividend_history: Vec<Node>,
}

impl FundSummary {
    pub fn project(tree: &Node) -> Self {
        let fees = tree.get("fees");
        let fee = |key: &str| fees.and_then(|f| f.get(key)).and_then(fee_text);
        Self {
            fund_name: value_of(tree, "fund_name"),
            fund_code: value_of(tree, "fund_code"),
            management_company: value_of(tree, "management_company"),
            custodian_bank: value_of(tree, "custodian_bank"),
            management_fee: fee(FEE_KEYS[0]),
            subscription_fee: fee(FEE_KEYS[1]),
            redemption_fee: fee(FEE_KEYS[2]),
            switching_fee: fee(FEE_KEYS[3]),
            portfolio: rows_of(tree, "portfolio"),
            nav_history: rows_of(tree, "nav_history"),
            dividend_history: rows_of(tree, "dividend_history"),
        }
    }
}

fn value_of(tree: &Node, key: &str) -> Option<Node> {
    tree.get(key).map(resolve_value).cloned()
}

/// Fee as display text; nothing for a null or empty fee. A zero fee is kept.
fn fee_text(field: &Node) -> Option<String> {
    match resolve_value(field) {
        Node::Scalar(Scalar::Null) => None,
        Node::Scalar(Scalar::String(s)) if s.trim().is_empty() => None,
        Node::Scalar(s) => Some(s.to_string()),
        other => Some(serde_json::Value::from(other).to_string()),
    }
}

fn rows_of(tree: &Node, key: &str) -> Vec<Node> {
    tree.get(key)
        .and_then(Node::as_sequence)
        .map(<[Node]>::to_vec)
        .unwrap_or_default()
}
