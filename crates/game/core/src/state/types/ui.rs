use bitflags::bitflags;

bitflags! {
    /// Player input keys that scripted content may lock out.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct KeyMask: u32 {
        const UP            = 1 << 0;
        const DOWN          = 1 << 1;
        const LEFT          = 1 << 2;
        const RIGHT         = 1 << 3;
        const FIRE_1        = 1 << 4;
        const FIRE_2        = 1 << 5;
        const FIRE_SPECIAL  = 1 << 6;
        const WARP          = 1 << 7;
        const SELECT_FRIEND = 1 << 8;
        const SELECT_FOE    = 1 << 9;
        const SELECT_BASE   = 1 << 10;
        const TARGET        = 1 << 11;
        const ORDER         = 1 << 12;
        const ZOOM_IN       = 1 << 13;
        const ZOOM_OUT      = 1 << 14;
        const COMP_UP       = 1 << 15;
        const COMP_DOWN     = 1 << 16;
        const COMP_ACCEPT   = 1 << 17;
        const COMP_CANCEL   = 1 << 18;
        const MESSAGE_NEXT  = 1 << 26;
    }
}

/// Minicomputer cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MiniSelection {
    pub screen: i32,
    pub line: i32,
}

/// Global interface state mutated by scripted content.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UiState {
    pub disabled_keys: KeyMask,
    pub zoom: i32,
    pub minicomputer: MiniSelection,
}
