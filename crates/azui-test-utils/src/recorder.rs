//! Recording hooks.

use azui_dnd::{
    AddEvent, ContainerEvent, Decision, DndEvent, DragEvent, DraggableOptions, DropEvent,
    DroppableOptions, ItemEvent, ResizableOptions, ResizeEvent, SortableOptions, StopData, hook,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// A recorded hook invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum HookCall {
    Item {
        name: &'static str,
        event: ItemEvent,
    },
    Container {
        name: &'static str,
        event: ContainerEvent,
    },
    Add(AddEvent),
    Stop(StopData),
    Drop {
        name: &'static str,
        event: DropEvent,
    },
    Drag {
        name: &'static str,
        event: DragEvent,
    },
    Resize {
        name: &'static str,
        event: ResizeEvent,
    },
}

impl HookCall {
    /// Name of the hook slot that fired.
    pub fn name(&self) -> &'static str {
        match self {
            HookCall::Item { name, .. }
            | HookCall::Container { name, .. }
            | HookCall::Drop { name, .. }
            | HookCall::Drag { name, .. }
            | HookCall::Resize { name, .. } => *name,
            HookCall::Add(_) => "add",
            HookCall::Stop(_) => "stop",
        }
    }
}

#[derive(Default)]
struct RecorderState {
    calls: Mutex<Vec<HookCall>>,
    vetoes: Mutex<Vec<&'static str>>,
}

/// Produces hooks that log every call and veto on demand.
///
/// Clones share the same log, so a recorder can be wired into options and
/// inspected afterwards.
#[derive(Clone, Default)]
pub struct HookRecorder {
    state: Arc<RecorderState>,
}

impl HookRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make hooks named `name` return [`Decision::Veto`] from now on.
    pub fn veto(&self, name: &'static str) {
        let mut vetoes = self.state.vetoes.lock();
        if !vetoes.contains(&name) {
            vetoes.push(name);
        }
    }

    /// Make hooks named `name` proceed again.
    pub fn allow(&self, name: &'static str) {
        self.state.vetoes.lock().retain(|v| *v != name);
    }

    fn record(&self, call: HookCall) -> Decision {
        let name = call.name();
        self.state.calls.lock().push(call);
        Decision::from(!self.state.vetoes.lock().contains(&name))
    }

    /// Attach recording hooks to every sortable slot.
    pub fn wire(&self, options: SortableOptions) -> SortableOptions {
        let item = |name: &'static str| {
            let recorder = self.clone();
            hook(move |event: &ItemEvent| {
                recorder.record(HookCall::Item {
                    name,
                    event: *event,
                })
            })
        };
        let container = |name: &'static str| {
            let recorder = self.clone();
            hook(move |event: &ContainerEvent| {
                recorder.record(HookCall::Container {
                    name,
                    event: *event,
                })
            })
        };
        let add = {
            let recorder = self.clone();
            hook(move |event: &AddEvent| recorder.record(HookCall::Add(*event)))
        };
        let stop = {
            let recorder = self.clone();
            hook(move |data: &StopData| recorder.record(HookCall::Stop(*data)))
        };

        options
            .on_create(item("create"))
            .on_start(item("start"))
            .on_enter(container("enter"))
            .on_exit(container("exit"))
            .on_sort(container("sort"))
            .on_sorted(container("sorted"))
            .on_add(add)
            .on_stop(stop)
    }

    /// Attach recording hooks to every droppable slot.
    pub fn wire_droppable(&self, options: DroppableOptions) -> DroppableOptions {
        let slot = |name: &'static str| {
            let recorder = self.clone();
            hook(move |event: &DropEvent| {
                recorder.record(HookCall::Drop {
                    name,
                    event: *event,
                })
            })
        };
        options
            .on_pointer_in(slot("pointer_in"))
            .on_pointer_out(slot("pointer_out"))
            .on_target_center_in(slot("target_center_in"))
            .on_target_center_out(slot("target_center_out"))
    }

    /// Attach recording hooks to every draggable slot.
    pub fn wire_draggable(&self, options: DraggableOptions) -> DraggableOptions {
        let slot = |name: &'static str| {
            let recorder = self.clone();
            hook(move |event: &DragEvent| {
                recorder.record(HookCall::Drag {
                    name,
                    event: *event,
                })
            })
        };
        options
            .on_create(slot("drag_create"))
            .on_start(slot("drag_start"))
            .on_drag(slot("drag"))
            .on_stop(slot("drag_stop"))
    }

    /// Attach recording hooks to every resizable slot.
    pub fn wire_resizable(&self, options: ResizableOptions) -> ResizableOptions {
        let slot = |name: &'static str| {
            let recorder = self.clone();
            hook(move |event: &ResizeEvent| {
                recorder.record(HookCall::Resize {
                    name,
                    event: *event,
                })
            })
        };
        options
            .on_create(slot("resize_create"))
            .on_resize(slot("resize"))
            .on_stop(slot("resize_stop"))
    }

    pub fn calls(&self) -> Vec<HookCall> {
        self.state.calls.lock().clone()
    }

    /// Names of the recorded calls, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.state.calls.lock().iter().map(HookCall::name).collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.state
            .calls
            .lock()
            .iter()
            .filter(|c| c.name() == name)
            .count()
    }

    /// Stop data received by `stop` hooks.
    pub fn stops(&self) -> Vec<StopData> {
        self.state
            .calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HookCall::Stop(data) => Some(*data),
                _ => None,
            })
            .collect()
    }

    /// Drop events received for one kind.
    pub fn drops(&self, kind: DndEvent) -> Vec<DropEvent> {
        self.state
            .calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HookCall::Drop { event, .. } if event.kind == kind => Some(*event),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.state.calls.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azui_core::math::Vec2;
    use azui_dom::ElementId;

    #[test]
    fn test_record_and_veto() {
        let recorder = HookRecorder::new();
        let options = recorder.wire(SortableOptions::default());
        let add = options.add.clone().unwrap();
        let event = AddEvent {
            container: ElementId(1),
            element: ElementId(2),
            cursor: Some(Vec2::ZERO),
        };

        assert_eq!(add(&event), Decision::Proceed);
        recorder.veto("add");
        assert_eq!(add(&event), Decision::Veto);
        recorder.allow("add");
        assert_eq!(add(&event), Decision::Proceed);

        assert_eq!(recorder.count("add"), 3);
        assert_eq!(recorder.names(), vec!["add", "add", "add"]);
        recorder.clear();
        assert!(recorder.calls().is_empty());
    }
}
