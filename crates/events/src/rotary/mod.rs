//! Rotary encoder plumbing: quadrature decoding and raw position sources
//!
//! ```text
//! pins ──► PositionSource ──raw counts──► Encoder ──CHANGED──► callback
//!            │                              floor(raw / divisor)
//!            └─ QuadratureDecoder (table lookup per transition)
//! ```

pub mod quadrature;
pub mod source;

pub use quadrature::{QuadratureDecoder, COUNTS_PER_DETENT, QUADRATURE_TABLE};
pub use source::{
    InterruptEncoder, PositionReader, PositionSource, QuadratureEncoder, SharedPosition,
    SingleEdgeEncoder,
};
