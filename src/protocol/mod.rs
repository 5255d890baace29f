//! Wire formats.
//!
//! Three-integer brick bitfield, dense layout matrices, and the JSON line
//! protocol spoken between a judge (or `drive`) and a bot process.

pub mod bitfield;
pub mod botzone;
pub mod layout;

pub use bitfield::{BrickMap, LayoutError};
pub use botzone::{
    parse_request, parse_response, InitPayload, ProtocolError, Request, RequestItem, Response, SideActions,
    KEEP_RUNNING,
};
pub use layout::{battlefield_from_bricks, battlefield_from_matrix, encode_bricks, encode_matrix, random_layout};
