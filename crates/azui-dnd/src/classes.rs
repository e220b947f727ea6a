//! Class names forming the DOM-visible protocol between the engine and
//! stylesheets or consumer widgets.

/// Marks a movable item of a sortable container.
pub const SORTABLE_ITEM: &str = "azSortableItem";
/// The item currently being dragged.
pub const SORTABLE_SELECTED: &str = "azSortableSelected";
/// The ghost element marking where the dragged item would land.
pub const PLACEHOLDER: &str = "az-placeholder";
/// Drop will land before the marked sibling (marker mode).
pub const DROP_BEFORE: &str = "azSortableDropBefore";
/// Drop will land after the marked sibling (marker mode).
pub const DROP_AFTER: &str = "azSortableDropAfter";
/// The dragged item is over a valid drop position (marker mode).
pub const ALLOW: &str = "azSortableAllow";
/// The dragged item is not over a valid drop position (marker mode).
pub const DENY: &str = "azSortableDeny";
/// Set while an item is in flight between containers.
pub const SORTABLE_MOVING: &str = "az-sortable-moving";
