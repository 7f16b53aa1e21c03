//! Shared Customization Store
//!
//! Single owner of [`CustomizationState`]. Every mutation goes through a
//! named operation which enforces the slot invariants and then notifies
//! subscribers with a [`Change`] describing what happened.
//!
//! The store lives on the UI thread; subscribers are plain boxed closures
//! called synchronously after each mutation.

mod slot;
mod state;

pub use slot::SlotId;
pub use state::{BaseColor, CustomizationState, DecalLimits, DecalTransform, ViewMode};

/// What a store mutation changed
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    ViewMode(ViewMode),
    BaseColor(BaseColor),
    SlotActive { slot: SlotId, active: bool },
    SlotImage(SlotId),
    SlotTransform(SlotId),
}

/// Handle returned by [`CustomizationStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Change, &CustomizationState)>;

pub struct CustomizationStore {
    state: CustomizationState,
    limits: DecalLimits,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl CustomizationStore {
    pub fn new(base_color: BaseColor, limits: DecalLimits) -> Self {
        Self {
            state: CustomizationState::new(base_color, &limits),
            limits,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Read-only view for the renderer and UI
    pub fn state(&self) -> &CustomizationState {
        &self.state
    }

    pub fn limits(&self) -> &DecalLimits {
        &self.limits
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Change, &CustomizationState) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, change: Change) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&change, &self.state);
        }
    }

    // ========================================================================
    // Named update operations
    // ========================================================================

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.state.view_mode == mode {
            return;
        }
        self.state.view_mode = mode;
        self.notify(Change::ViewMode(mode));
    }

    pub fn set_base_color(&mut self, color: BaseColor) {
        if self.state.base_color == color {
            return;
        }
        self.state.base_color = color;
        self.notify(Change::BaseColor(color));
    }

    /// Flip one slot's visibility. Other slots are never touched.
    pub fn toggle_slot(&mut self, slot: SlotId) -> bool {
        let active = !self.state.slot(slot).active;
        self.set_slot_active(slot, active);
        active
    }

    pub fn set_slot_active(&mut self, slot: SlotId, active: bool) {
        let entry = self.state.slot_mut(slot);
        if entry.active == active {
            return;
        }
        entry.active = active;
        self.notify(Change::SlotActive { slot, active });
    }

    /// Bind a new image. An empty reference falls back to the placeholder.
    pub fn set_slot_image(&mut self, slot: SlotId, image_ref: impl Into<String>) {
        self.state.slot_mut(slot).image_ref = image_ref.into();
        self.notify(Change::SlotImage(slot));
    }

    /// Commit a transform override; depth is pinned and chest ranges clamped
    pub fn set_slot_transform(&mut self, slot: SlotId, transform: DecalTransform) {
        let constrained = self.limits.constrain(slot, transform);
        let entry = self.state.slot_mut(slot);
        if entry.transform == constrained {
            return;
        }
        entry.transform = constrained;
        self.notify(Change::SlotTransform(slot));
    }

    pub fn reset_slot_transform(&mut self, slot: SlotId) {
        let default = DecalTransform::slot_default(slot, self.limits.base_scale);
        self.set_slot_transform(slot, default);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> CustomizationStore {
        CustomizationStore::new(BaseColor::default(), DecalLimits::default())
    }

    #[test]
    fn test_toggle_touches_only_one_slot() {
        for target in SlotId::ALL {
            let mut store = store();
            let before = store.state().clone();
            store.toggle_slot(target);
            for other in SlotId::ALL {
                let was = before.slot(other).active;
                let now = store.state().slot(other).active;
                if other == target {
                    assert_ne!(was, now);
                } else {
                    assert_eq!(was, now);
                }
            }
        }
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut store = store();
        let seen: Rc<RefCell<Vec<Change>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |change, _| sink.borrow_mut().push(change.clone()));

        store.set_view_mode(ViewMode::Editing);
        store.toggle_slot(SlotId::Back);
        store.set_slot_image(SlotId::Back, "data:image/png;base64,AAAA");

        assert_eq!(
            *seen.borrow(),
            vec![
                Change::ViewMode(ViewMode::Editing),
                Change::SlotActive { slot: SlotId::Back, active: true },
                Change::SlotImage(SlotId::Back),
            ]
        );
    }

    #[test]
    fn test_no_notification_without_change() {
        let mut store = store();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        store.subscribe(move |_, _| *sink.borrow_mut() += 1);

        store.set_view_mode(ViewMode::Intro);
        store.set_base_color(BaseColor::default());
        store.set_slot_active(SlotId::Chest, true);
        store.reset_slot_transform(SlotId::Chest);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = store();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_, _| *sink.borrow_mut() += 1);

        store.set_base_color(BaseColor::new(1, 2, 3));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_base_color(BaseColor::new(4, 5, 6));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_subscriber_sees_new_state() {
        let mut store = store();
        let color = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&color);
        store.subscribe(move |_, state| *sink.borrow_mut() = Some(state.base_color));
        store.set_base_color(BaseColor::new(0x2C, 0xCC, 0xE4));
        assert_eq!(*color.borrow(), Some(BaseColor::new(0x2C, 0xCC, 0xE4)));
    }

    #[test]
    fn test_transform_is_constrained() {
        let mut store = store();
        store.set_slot_transform(
            SlotId::Chest,
            DecalTransform {
                position: Vec3::new(1.0, 1.0, 1.0),
                rotation: Vec3::ZERO,
                scale: Vec3::splat(9.0),
            },
        );
        let t = store.state().slot(SlotId::Chest).transform;
        assert!((t.position.x - 0.12).abs() < 0.0001);
        assert!((t.position.y - 0.10).abs() < 0.0001);
        assert!((t.position.z - SlotId::Chest.spec().depth_offset).abs() < 0.0001);
        assert!((t.scale.z - 0.25).abs() < 0.0001);

        store.reset_slot_transform(SlotId::Chest);
        assert_eq!(
            store.state().slot(SlotId::Chest).transform,
            DecalTransform::slot_default(SlotId::Chest, 0.1)
        );
    }
}
