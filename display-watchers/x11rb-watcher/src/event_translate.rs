//! Translate events from x11rb to protocol commands.

use tartwm_core::command::Command;
use tartwm_core::models::{Rect, WindowHandle};
use x11rb::protocol::{xproto, Event};

use crate::tracker::WindowTracker;
use crate::xwrap::window_event_mask;

/// What the run loop must do for one event.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Register the window mask on a newly seen window, then notify the host.
    Register(xproto::Window, Command),
    /// Forward to the host as-is.
    Notify(Command),
}

/// Translates one event against the tracker.
///
/// Returns `None` for events with no protocol traffic: replayed creations,
/// crossings into untracked or inferior windows, and X protocol errors.
pub(crate) fn translate(
    event: &Event,
    tracker: &mut WindowTracker,
    root: xproto::Window,
) -> Option<Action> {
    match event {
        Event::CreateNotify(e) => from_create_notify(e, tracker),
        Event::DestroyNotify(e) => from_destroy_notify(e, tracker),
        Event::EnterNotify(e) => from_enter_notify(e, tracker, root),
        Event::Error(e) => {
            tracing::warn!("X11 error event: {:?}", e);
            None
        }
        // Anything else still reaches the host, reduced to its event code.
        _ => {
            tracing::trace!("no dedicated verb for {:?}", event);
            Some(Action::Notify(Command::Unhandled {
                code: event.response_type(),
            }))
        }
    }
}

fn from_create_notify(
    event: &xproto::CreateNotifyEvent,
    tracker: &mut WindowTracker,
) -> Option<Action> {
    if !tracker.track(event.window, window_event_mask()) {
        // Already seen during enumeration; nothing new to report.
        return None;
    }
    let rect = Rect::new(
        event.x.into(),
        event.y.into(),
        event.width.into(),
        event.height.into(),
    );
    Some(Action::Register(
        event.window,
        Command::WindowCreated {
            window: WindowHandle(event.window),
            rect,
        },
    ))
}

fn from_destroy_notify(
    event: &xproto::DestroyNotifyEvent,
    tracker: &mut WindowTracker,
) -> Option<Action> {
    if !tracker.untrack(event.window) {
        return None;
    }
    Some(Action::Notify(Command::WindowDestroyed {
        window: WindowHandle(event.window),
    }))
}

fn from_enter_notify(
    event: &xproto::EnterNotifyEvent,
    tracker: &WindowTracker,
    root: xproto::Window,
) -> Option<Action> {
    if event.mode != xproto::NotifyMode::NORMAL
        || event.detail == xproto::NotifyDetail::INFERIOR
        || event.event == root
    {
        return None;
    }
    if !tracker.contains(event.event) {
        return None;
    }
    Some(Action::Notify(Command::WindowEntered {
        window: WindowHandle(event.event),
    }))
}

#[cfg(test)]
mod test {
    use super::*;

    const ROOT: xproto::Window = 1;

    fn create_event(window: xproto::Window, x: i16, y: i16, w: u16, h: u16) -> Event {
        Event::CreateNotify(xproto::CreateNotifyEvent {
            response_type: xproto::CREATE_NOTIFY_EVENT,
            sequence: 0,
            parent: ROOT,
            window,
            x,
            y,
            width: w,
            height: h,
            border_width: 0,
            override_redirect: false,
        })
    }

    fn destroy_event(window: xproto::Window) -> Event {
        Event::DestroyNotify(xproto::DestroyNotifyEvent {
            response_type: xproto::DESTROY_NOTIFY_EVENT,
            sequence: 0,
            event: ROOT,
            window,
        })
    }

    fn enter_event(
        window: xproto::Window,
        mode: xproto::NotifyMode,
        detail: xproto::NotifyDetail,
    ) -> Event {
        Event::EnterNotify(xproto::EnterNotifyEvent {
            response_type: xproto::ENTER_NOTIFY_EVENT,
            detail,
            sequence: 0,
            time: x11rb::CURRENT_TIME,
            root: ROOT,
            event: window,
            child: x11rb::NONE,
            root_x: 0,
            root_y: 0,
            event_x: 0,
            event_y: 0,
            state: xproto::KeyButMask::from(0u16),
            mode,
            same_screen_focus: 0,
        })
    }

    #[test]
    fn create_registers_and_reports() {
        let mut tracker = WindowTracker::new();

        let action = translate(&create_event(7, 10, 20, 300, 200), &mut tracker, ROOT);

        assert_eq!(
            action,
            Some(Action::Register(
                7,
                Command::WindowCreated {
                    window: WindowHandle(7),
                    rect: Rect::new(10, 20, 300, 200),
                },
            ))
        );
        assert!(tracker.contains(7));
    }

    #[test]
    fn replayed_create_is_silent() {
        let mut tracker = WindowTracker::new();
        tracker.track(7, window_event_mask());

        let action = translate(&create_event(7, 0, 0, 1, 1), &mut tracker, ROOT);

        assert_eq!(action, None);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn destroy_unregisters() {
        let mut tracker = WindowTracker::new();
        tracker.track(7, window_event_mask());

        let action = translate(&destroy_event(7), &mut tracker, ROOT);

        assert_eq!(
            action,
            Some(Action::Notify(Command::WindowDestroyed {
                window: WindowHandle(7),
            }))
        );
        assert!(!tracker.contains(7));

        // a second destroy for the same window is silent
        assert_eq!(translate(&destroy_event(7), &mut tracker, ROOT), None);
    }

    #[test]
    fn enter_reports_tracked_windows() {
        let mut tracker = WindowTracker::new();
        tracker.track(7, window_event_mask());

        let action = translate(
            &enter_event(7, xproto::NotifyMode::NORMAL, xproto::NotifyDetail::ANCESTOR),
            &mut tracker,
            ROOT,
        );

        assert_eq!(
            action,
            Some(Action::Notify(Command::WindowEntered {
                window: WindowHandle(7),
            }))
        );
    }

    #[test]
    fn enter_filters_grabs_inferiors_and_root() {
        let mut tracker = WindowTracker::new();
        tracker.track(7, window_event_mask());

        let grab = enter_event(7, xproto::NotifyMode::GRAB, xproto::NotifyDetail::ANCESTOR);
        assert_eq!(translate(&grab, &mut tracker, ROOT), None);

        let inferior = enter_event(
            7,
            xproto::NotifyMode::NORMAL,
            xproto::NotifyDetail::INFERIOR,
        );
        assert_eq!(translate(&inferior, &mut tracker, ROOT), None);

        let root = enter_event(
            ROOT,
            xproto::NotifyMode::NORMAL,
            xproto::NotifyDetail::ANCESTOR,
        );
        assert_eq!(translate(&root, &mut tracker, ROOT), None);
    }

    #[test]
    fn enter_ignores_untracked_windows() {
        let mut tracker = WindowTracker::new();

        let action = translate(
            &enter_event(9, xproto::NotifyMode::NORMAL, xproto::NotifyDetail::ANCESTOR),
            &mut tracker,
            ROOT,
        );

        assert_eq!(action, None);
    }

    #[test]
    fn other_events_carry_their_code() {
        let mut tracker = WindowTracker::new();

        let event = Event::MapNotify(xproto::MapNotifyEvent {
            response_type: xproto::MAP_NOTIFY_EVENT,
            sequence: 0,
            event: ROOT,
            window: 7,
            override_redirect: false,
        });

        assert_eq!(
            translate(&event, &mut tracker, ROOT),
            Some(Action::Notify(Command::Unhandled {
                code: xproto::MAP_NOTIFY_EVENT,
            }))
        );
    }
}
