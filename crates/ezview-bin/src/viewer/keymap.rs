/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::viewer::quad::{QuadGeometry, UvMapping};

const TRANSLATE_STEP: f32 = 0.05;
const SCALE_DOWN: f32 = 0.95;
const SCALE_UP: f32 = 1.05;
const SHEAR_STEP: f32 = 0.05;
const ROTATE_STEP: f32 = 5.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KeyAction {
    Translate(f32, f32),
    Scale(f32),
    ShearX(f32),
    ShearY(f32),
    /// Degrees, positive is counter clockwise
    Rotate(f32),
    Quit
}

impl KeyAction {
    /// Apply the transform to `quad`, [`KeyAction::Quit`] leaves it untouched
    pub fn apply(self, quad: &mut QuadGeometry) {
        match self {
            KeyAction::Translate(dx, dy) => quad.translate(dx, dy),
            KeyAction::Scale(factor) => quad.scale(factor),
            KeyAction::ShearX(k) => quad.shear_x(k),
            KeyAction::ShearY(k) => quad.shear_y(k),
            KeyAction::Rotate(degrees) => quad.rotate(degrees),
            KeyAction::Quit => {}
        }
    }
}

/// What a single key event resolves to
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KeyOutcome {
    Action(KeyAction),
    /// Releases, and repeats the bindings do not act on
    Ignored,
    /// A key with no binding, worth a diagnostic
    Unknown
}

/// Keys shared by both presets
const COMMON: [(KeyCode, KeyAction); 7] = [
    (KeyCode::Escape, KeyAction::Quit),
    (KeyCode::ArrowUp, KeyAction::Translate(0.0, -TRANSLATE_STEP)),
    (KeyCode::ArrowDown, KeyAction::Translate(0.0, TRANSLATE_STEP)),
    (KeyCode::ArrowRight, KeyAction::Translate(TRANSLATE_STEP, 0.0)),
    (KeyCode::ArrowLeft, KeyAction::Translate(-TRANSLATE_STEP, 0.0)),
    (KeyCode::KeyW, KeyAction::Scale(SCALE_UP)),
    (KeyCode::KeyS, KeyAction::Scale(SCALE_DOWN))
];

const CLASSIC: [(KeyCode, KeyAction); 6] = [
    (KeyCode::KeyA, KeyAction::ShearX(-SHEAR_STEP)),
    (KeyCode::KeyD, KeyAction::ShearX(SHEAR_STEP)),
    (KeyCode::KeyQ, KeyAction::ShearY(-SHEAR_STEP)),
    (KeyCode::KeyE, KeyAction::ShearY(SHEAR_STEP)),
    (KeyCode::KeyZ, KeyAction::Rotate(ROTATE_STEP)),
    (KeyCode::KeyX, KeyAction::Rotate(-ROTATE_STEP))
];

const ALTERNATE: [(KeyCode, KeyAction); 6] = [
    (KeyCode::KeyJ, KeyAction::ShearX(-SHEAR_STEP)),
    (KeyCode::KeyL, KeyAction::ShearX(SHEAR_STEP)),
    (KeyCode::KeyI, KeyAction::ShearY(-SHEAR_STEP)),
    (KeyCode::KeyK, KeyAction::ShearY(SHEAR_STEP)),
    (KeyCode::KeyU, KeyAction::Rotate(ROTATE_STEP)),
    (KeyCode::KeyO, KeyAction::Rotate(-ROTATE_STEP))
];

/// A key table plus the few behaviours that differ between presets
#[derive(Copy, Clone, Debug)]
pub struct KeyBindings {
    extra:          &'static [(KeyCode, KeyAction)],
    accept_repeats: bool,
    mapping:        UvMapping
}

impl KeyBindings {
    /// Shear on A/D and Q/E, rotate on Z/X, presses only
    pub const fn classic() -> KeyBindings {
        KeyBindings {
            extra:          &CLASSIC,
            accept_repeats: false,
            mapping:        UvMapping::Upright
        }
    }

    /// Shear on J/L and I/K, rotate on U/O, held keys keep acting
    pub const fn alternate() -> KeyBindings {
        KeyBindings {
            extra:          &ALTERNATE,
            accept_repeats: true,
            mapping:        UvMapping::Flipped
        }
    }

    /// Texture mapping the quad starts with
    pub const fn uv_mapping(&self) -> UvMapping {
        self.mapping
    }

    pub fn lookup(&self, key: KeyCode) -> Option<KeyAction> {
        COMMON
            .iter()
            .chain(self.extra)
            .find(|(code, _)| *code == key)
            .map(|(_, action)| *action)
    }

    pub fn interpret(&self, key: PhysicalKey, state: ElementState, repeat: bool) -> KeyOutcome {
        if state == ElementState::Released || (repeat && !self.accept_repeats) {
            return KeyOutcome::Ignored;
        }
        let action = match key {
            PhysicalKey::Code(code) => self.lookup(code),
            PhysicalKey::Unidentified(_) => None
        };
        match action {
            Some(action) => KeyOutcome::Action(action),
            None if repeat => KeyOutcome::Ignored,
            None => KeyOutcome::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use winit::keyboard::NativeKeyCode;

    use super::*;

    fn press(bindings: &KeyBindings, code: KeyCode) -> KeyOutcome {
        bindings.interpret(PhysicalKey::Code(code), ElementState::Pressed, false)
    }

    fn repeat(bindings: &KeyBindings, code: KeyCode) -> KeyOutcome {
        bindings.interpret(PhysicalKey::Code(code), ElementState::Pressed, true)
    }

    #[test]
    fn common_keys() {
        for bindings in [KeyBindings::classic(), KeyBindings::alternate()] {
            assert_eq!(press(&bindings, KeyCode::Escape), KeyOutcome::Action(KeyAction::Quit));
            assert_eq!(
                press(&bindings, KeyCode::ArrowUp),
                KeyOutcome::Action(KeyAction::Translate(0.0, -0.05))
            );
            assert_eq!(
                press(&bindings, KeyCode::KeyW),
                KeyOutcome::Action(KeyAction::Scale(1.05))
            );
            assert_eq!(
                press(&bindings, KeyCode::KeyS),
                KeyOutcome::Action(KeyAction::Scale(0.95))
            );
        }
    }

    #[test]
    fn classic_table() {
        let bindings = KeyBindings::classic();

        assert_eq!(bindings.lookup(KeyCode::KeyA), Some(KeyAction::ShearX(-0.05)));
        assert_eq!(bindings.lookup(KeyCode::KeyE), Some(KeyAction::ShearY(0.05)));
        assert_eq!(bindings.lookup(KeyCode::KeyZ), Some(KeyAction::Rotate(5.0)));
        assert_eq!(bindings.lookup(KeyCode::KeyX), Some(KeyAction::Rotate(-5.0)));
        assert_eq!(bindings.lookup(KeyCode::KeyJ), None);
        assert_eq!(bindings.uv_mapping(), UvMapping::Upright);
    }

    #[test]
    fn alternate_table() {
        let bindings = KeyBindings::alternate();

        assert_eq!(bindings.lookup(KeyCode::KeyL), Some(KeyAction::ShearX(0.05)));
        assert_eq!(bindings.lookup(KeyCode::KeyI), Some(KeyAction::ShearY(-0.05)));
        assert_eq!(bindings.lookup(KeyCode::KeyO), Some(KeyAction::Rotate(-5.0)));
        assert_eq!(bindings.lookup(KeyCode::KeyA), None);
        assert_eq!(bindings.uv_mapping(), UvMapping::Flipped);
    }

    #[test]
    fn repeats() {
        let classic = KeyBindings::classic();
        let alternate = KeyBindings::alternate();

        assert_eq!(repeat(&classic, KeyCode::ArrowLeft), KeyOutcome::Ignored);
        assert_eq!(repeat(&classic, KeyCode::KeyP), KeyOutcome::Ignored);
        assert_eq!(
            repeat(&alternate, KeyCode::ArrowLeft),
            KeyOutcome::Action(KeyAction::Translate(-0.05, 0.0))
        );
        assert_eq!(repeat(&alternate, KeyCode::KeyP), KeyOutcome::Ignored);
    }

    #[test]
    fn unknown_and_released_keys() {
        let bindings = KeyBindings::classic();

        assert_eq!(press(&bindings, KeyCode::KeyP), KeyOutcome::Unknown);
        assert_eq!(
            bindings.interpret(
                PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
                ElementState::Pressed,
                false
            ),
            KeyOutcome::Unknown
        );
        assert_eq!(
            bindings.interpret(PhysicalKey::Code(KeyCode::KeyP), ElementState::Released, false),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn actions_move_the_quad() {
        let mut quad = QuadGeometry::new(UvMapping::Upright);
        let start = quad;

        KeyAction::Quit.apply(&mut quad);
        assert_eq!(quad, start);

        KeyAction::Translate(0.05, 0.0).apply(&mut quad);
        assert!((quad.centre()[0] - 0.05).abs() < 1e-6);
    }
}
