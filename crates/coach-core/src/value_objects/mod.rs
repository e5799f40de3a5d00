//! Value objects - immutable types that represent domain concepts

mod capabilities;
mod snowflake;

pub use capabilities::{Capabilities, Role};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
