//! Turns raw touches and held keys into the intents the simulation understands.
//! Screen coordinates grow rightward and downward, so a downward drag means `Direction::Down`.

use arcade_core::clock::Countdown;
use arcade_core::{Direction, Intent, TapZone};

/// Minimum drag, in points, before a touch counts as a swipe.
pub const SWIPE_THRESHOLD: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug)]
pub struct GestureDecoder {
    screen_width: f32,
    hold_repeat_seconds: f32,
    touch_start: Option<TouchPoint>,
    swiped: bool,
    held: Option<Direction>,
    repeat: Countdown,
}

impl GestureDecoder {
    pub fn new(screen_width: f32, hold_repeat_seconds: f32) -> Self {
        Self {
            screen_width,
            hold_repeat_seconds,
            touch_start: None,
            swiped: false,
            held: None,
            repeat: Countdown::idle(),
        }
    }

    pub fn touch_began(&mut self, point: TouchPoint) {
        self.touch_start = Some(point);
        self.swiped = false;
    }

    /// Emits one move per touch, once the drag passes the threshold on its dominant axis.
    /// The swipe direction then repeats for as long as the finger stays down.
    pub fn touch_moved(&mut self, point: TouchPoint) -> Option<Intent> {
        let start = self.touch_start?;
        if self.swiped {
            return None;
        }
        let direction = swipe_direction(start, point)?;
        self.swiped = true;
        Some(self.hold(direction))
    }

    /// A flick too fast for any move event still swipes; anything shorter taps a screen half.
    pub fn touch_ended(&mut self, point: TouchPoint) -> Option<Intent> {
        let start = self.touch_start.take()?;
        let swiped = self.swiped;
        self.swiped = false;
        self.release();
        if swiped {
            return None;
        }
        if let Some(direction) = swipe_direction(start, point) {
            return Some(Intent::Move(direction));
        }
        let zone =
            if start.x < self.screen_width / 2.0 { TapZone::LeftHalf } else { TapZone::RightHalf };
        Some(Intent::Tap(zone))
    }

    pub fn key_down(&mut self, direction: Direction) -> Intent {
        self.hold(direction)
    }

    pub fn key_up(&mut self, direction: Direction) {
        if self.held == Some(direction) {
            self.release();
        }
    }

    /// Repeats the held direction every `hold_repeat_seconds`.
    pub fn update(&mut self, dt: f32) -> Option<Intent> {
        let direction = self.held?;
        if !self.repeat.tick(dt) {
            return None;
        }
        self.repeat.start(self.hold_repeat_seconds);
        Some(Intent::Move(direction))
    }

    fn hold(&mut self, direction: Direction) -> Intent {
        self.held = Some(direction);
        self.repeat.start(self.hold_repeat_seconds);
        Intent::Move(direction)
    }

    fn release(&mut self) {
        self.held = None;
        self.repeat.cancel();
    }
}

fn swipe_direction(start: TouchPoint, end: TouchPoint) -> Option<Direction> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx.abs().max(dy.abs()) < SWIPE_THRESHOLD {
        return None;
    }
    Some(if dx.abs() >= dy.abs() {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    })
}
