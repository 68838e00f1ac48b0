//! EPG (Electronic Program Guide) module
//!
//! Contains the XMLTV tree, its parser and writer, and the WIB time shift
//! and sports filter applied to it.

mod decompress;
mod document;
mod parser;
mod sports;
mod timeshift;
mod writer;

// Re-export public types
pub use decompress::{decompress, is_gzip};
pub use document::{
    TvDocument,
    XmlNode,
    ATTR_CHANNEL,
    ATTR_ID,
    ATTR_START,
    ATTR_STOP,
    TAG_CHANNEL,
    TAG_DISPLAY_NAME,
    TAG_PROGRAMME,
    TAG_TITLE,
};
pub use parser::EpgParser;
pub use sports::{FilterStats, KeywordSet, SportsFilter, SPORT_KEYWORDS};
pub use timeshift::{parse_utc_time, ShiftStats, TimeShift, TimestampPolicy, WIB_OFFSET_HOURS};
pub use writer::to_xml_bytes;
