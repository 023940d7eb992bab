// Fixed-layout state and arc records for the binary transducer format.

use bytemuck::{Pod, Zeroable};

/// Sentinel start state for a transducer with no start (empty language).
pub const NO_STATE: u32 = u32::MAX;

/// Final weight stored for non-final states.
pub const NON_FINAL: f32 = f32::INFINITY;

/// Counts block following the header (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CountsRecord {
    pub state_count: u32,
    pub arc_count: u32,
    pub start: u32,
    pub _reserved: u32,
}

/// State record (16 bytes).
///
/// The arcs leaving a state are stored contiguously in the arc table:
/// `arcs[first_arc .. first_arc + arc_count]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct StateRecord {
    pub first_arc: u32,
    pub arc_count: u32,
    /// Final weight, or [`NON_FINAL`].
    pub final_weight: f32,
    pub _reserved: u32,
}

/// Arc record (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ArcRecord {
    pub ilabel: u32,
    pub olabel: u32,
    pub weight: f32,
    pub nextstate: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sizes() {
        assert_eq!(size_of::<CountsRecord>(), 16);
        assert_eq!(size_of::<StateRecord>(), 16);
        assert_eq!(size_of::<ArcRecord>(), 16);
    }

    #[test]
    fn arc_record_bytes() {
        let arc = ArcRecord {
            ilabel: 0x31,
            olabel: 0,
            weight: 0.5,
            nextstate: 7,
        };
        let bytes = bytemuck::bytes_of(&arc);
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..4], &0x31u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &7u32.to_le_bytes());
    }
}
