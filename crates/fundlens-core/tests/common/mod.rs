#![allow(dead_code)]

use fundlens_core::{FieldPath, Node};
use serde_json::{json, Value};

pub fn node(v: Value) -> Node {
    Node::from(v)
}

pub fn path(s: &str) -> FieldPath {
    FieldPath::parse(s).expect("valid field path")
}

/// A fund report as produced by a mix of engine versions: top-level identity
/// fields wrapped with locations, some fees still bare, tabular sections with
/// located cells.
pub fn sample_report() -> Node {
    node(json!({
        "fund_name": {"value": "ABC Balanced Fund", "page": 1, "bbox": [80, 120, 110, 620]},
        "fund_code": {"value": "ABCBF", "page": 1, "bbox": [115, 120, 135, 260]},
        "management_company": "ABC Asset Management",
        "custodian_bank": {"value": "XYZ Bank", "page": 2, "bbox": [300, 100, 320, 480]},
        "fees": {
            "management_fee": {"value": "1.75%", "page": 3, "bbox": [100, 100, 150, 400]},
            "subscription_fee": "0.5%",
            "redemption_fee": {"value": "0.3%", "page": 3, "bbox": [160, 100, 190, 400]},
            "switching_fee": {"value": null, "page": 3, "bbox": [200, 100, 200, 100]}
        },
        "portfolio": [
            {
                "ma_ck": {"value": "VNM", "page": 4, "bbox": [210, 50, 230, 150]},
                "so_luong": {"value": 12000, "page": 4, "bbox": [210, 160, 230, 260]}
            },
            {
                "ma_ck": {"value": "FPT", "page": 4, "bbox": [235, 50, 255, 150]},
                "so_luong": 8000
            }
        ],
        "nav_history": [
            {
                "date": "2024-01-31",
                "nav": {"value": 10512.4, "page": 5, "bbox": [400, 500, 420, 600]}
            },
            {"date": "2024-02-29", "nav": {"value": 10630.9, "page": 5, "bbox": [425, 500, 445]}}
        ]
    }))
}
