//! Inline element styles and their Taffy translation.

/// CSS-like `position` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// Normal flow; `left`/`top` are ignored.
    #[default]
    Static,
    /// Normal flow, shifted by `left`/`top`.
    Relative,
    /// Taken out of flow, placed at `left`/`top` inside the parent.
    Absolute,
}

/// CSS-like `visibility` property. Hidden elements still occupy space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// CSS-like `display` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Flex,
    None,
}

/// Main axis along which an element lays out its in-flow children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Row,
    Column,
}

/// Inline style of an element.
///
/// Only the properties the interaction engine reads or writes are modelled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineStyle {
    pub position: Positioning,
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub z_index: Option<i32>,
    pub visibility: Visibility,
    pub display: Display,
    pub flow: Flow,
    pub wrap: bool,
    pub gap: f32,
}

impl InlineStyle {
    /// Set an explicit width and height.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = Some(width);
        self.height = Some(height);
    }

    /// Clear `left`/`top` offsets.
    pub fn clear_offsets(&mut self) {
        self.left = None;
        self.top = None;
    }

    /// Current `left`/`top` offset, treating unset values as zero.
    pub fn offset(&self) -> (f32, f32) {
        (self.left.unwrap_or(0.0), self.top.unwrap_or(0.0))
    }

    /// Whether this element is out of normal flow.
    pub fn is_out_of_flow(&self) -> bool {
        self.position == Positioning::Absolute || self.display == Display::None
    }

    pub fn is_positioned(&self) -> bool {
        self.position != Positioning::Static
    }

    /// Build the Taffy style for this element.
    ///
    /// Every element is a flex container that does not shrink its children and
    /// aligns them at the start, so explicit sizes are always honored.
    pub fn to_taffy(&self) -> taffy::Style {
        let inset = |value: Option<f32>| match (self.position, value) {
            (Positioning::Static, _) | (_, None) => taffy::LengthPercentageAuto::Auto,
            (_, Some(v)) => taffy::LengthPercentageAuto::Length(v),
        };
        let dimension = |value: Option<f32>| match value {
            Some(v) => taffy::Dimension::Length(v),
            None => taffy::Dimension::Auto,
        };

        taffy::Style {
            display: match self.display {
                Display::Flex => taffy::Display::Flex,
                Display::None => taffy::Display::None,
            },
            position: match self.position {
                Positioning::Absolute => taffy::Position::Absolute,
                Positioning::Static | Positioning::Relative => taffy::Position::Relative,
            },
            inset: taffy::Rect {
                left: inset(self.left),
                right: taffy::LengthPercentageAuto::Auto,
                top: inset(self.top),
                bottom: taffy::LengthPercentageAuto::Auto,
            },
            size: taffy::Size {
                width: dimension(self.width),
                height: dimension(self.height),
            },
            flex_direction: match self.flow {
                Flow::Row => taffy::FlexDirection::Row,
                Flow::Column => taffy::FlexDirection::Column,
            },
            flex_wrap: if self.wrap {
                taffy::FlexWrap::Wrap
            } else {
                taffy::FlexWrap::NoWrap
            },
            gap: taffy::Size {
                width: taffy::LengthPercentage::Length(self.gap),
                height: taffy::LengthPercentage::Length(self.gap),
            },
            flex_shrink: 0.0,
            align_items: Some(taffy::AlignItems::FlexStart),
            align_content: Some(taffy::AlignContent::FlexStart),
            ..Default::default()
        }
    }
}
