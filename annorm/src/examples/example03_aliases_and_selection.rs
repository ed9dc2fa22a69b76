use anyhow::Result;
use serde::Serialize;

use crate::{AliasMap, Entity, EntityMapper, FieldSelector};

/// @table=orders
#[derive(Entity, Serialize, Default, Debug)]
pub struct OrderLine {
    /// @type=integer @pkey
    pub order_id: Option<i64>,

    /// @type=integer @pkey
    pub line_no: Option<i64>,

    /// @type=integer @field=qty
    pub quantity: Option<i64>,

    /// Customer comment; quotes are escaped.
    /// @serializer=quoted_string
    pub comment: Option<String>,

    /// Owned by the customers table.
    /// @type=string @table=customers @field=name
    pub customer_name: Option<String>,

    /// Cached total, recomputed on load.
    #[annorm(skip)]
    pub cached_total: Option<i64>,
}

/// Rendered fragments of one order line under each selector.
#[derive(Debug)]
pub struct SelectionReport {
    pub keys: String,
    pub values: String,
    pub everything: String,
    pub chosen: String,
}

/// Example 03 – composite keys, aliases and explicit field selection.
pub fn run() -> Result<SelectionReport> {
    let mapper = EntityMapper::<OrderLine>::new()?;
    let aliases = AliasMap::from([
        ("orders".to_string(), "o".to_string()),
        ("customers".to_string(), "c".to_string()),
    ]);

    let line = OrderLine {
        order_id: Some(1001),
        line_no: Some(2),
        quantity: Some(3),
        comment: Some("don't bend".to_string()),
        customer_name: Some("Ada".to_string()),
        cached_total: Some(99),
    };

    Ok(SelectionReport {
        keys: mapper.make_assignment_fragment(&line, &FieldSelector::PrimaryKeyOnly, Some(&aliases))?,
        values: mapper.make_assignment_fragment(&line, &FieldSelector::AllExceptPrimaryKey, Some(&aliases))?,
        everything: mapper.make_assignment_fragment(&line, &FieldSelector::AllFields, None)?,
        chosen: mapper.make_assignment_fragment(&line, &FieldSelector::explicit(["qty", "comment"]), Some(&aliases))?,
    })
}
