//! Spec command implementation.

use anyhow::Result;
use oxrates_lib::connection_specification;
use std::io;

use crate::message::Message;

/// Print the connector's configuration schema.
pub(crate) fn spec() -> Result<()> {
    Message::spec(connection_specification()).emit(io::stdout().lock())
}
