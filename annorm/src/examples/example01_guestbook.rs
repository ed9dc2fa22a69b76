use anyhow::Result;
use serde::Serialize;

use crate::{Entity, EntityMapper};

/// A guestbook entry.
///
/// @table=guestbook
#[derive(Entity, Serialize, Default, Debug)]
pub struct GuestbookRecord {
    /// @type=integer
    /// @pkey
    pub id: Option<i64>,

    /// @type=string
    pub message: Option<String>,

    /// @serializer=string
    pub title: Option<String>,
}

/// Example 01 – map a guestbook entry to an `INSERT ... SET` statement.
pub fn run() -> Result<String> {
    let mapper = EntityMapper::<GuestbookRecord>::new()?;

    let mut entry = mapper.new_instance();
    entry.id = Some(42);
    entry.message = Some("Hello World!".to_string());
    entry.title = Some("Test".to_string());

    let table = mapper.table_name()?;
    let set = mapper.make_set(&entry)?;
    Ok(format!("INSERT {table} SET {set};"))
}
