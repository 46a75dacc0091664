use crate::{Error, Result, config::SliderConfig};
use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};
use tracing::debug;

const MAX_STEP_DECIMALS: usize = 6;

/// Free-text topic input.
#[derive(Debug, Default)]
pub struct TopicField {
    text: Mutex<String>,
}

impl TopicField {
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text.into();
    }

    pub fn text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A range input with a value label beside it.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeControl {
    name: String,
    min: f64,
    max: f64,
    step: f64,
    value: f64,
    label: String,
}

impl RangeControl {
    pub fn new(name: impl Into<String>, bounds: &SliderConfig) -> Self {
        let mut control = Self {
            name: name.into(),
            min: bounds.min,
            max: bounds.max,
            step: bounds.step,
            value: bounds.min,
            label: String::new(),
        };
        control.set(bounds.default);
        control
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Integer reading of the value; the fractional part is dropped.
    pub fn as_integer(&self) -> u32 {
        self.value.trunc().max(0.0) as u32
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Clamps into range, snaps to the step grid and refreshes the label.
    pub fn set(&mut self, value: f64) {
        let max_steps = ((self.max - self.min) / self.step + 1e-9).floor();
        let steps = ((value - self.min) / self.step).round().clamp(0.0, max_steps);

        let decimals = self.decimals();
        let scale = 10f64.powi(decimals as i32);
        self.value = ((self.min + steps * self.step) * scale).round() / scale;
        // Shortest form, as a range input prints its value: 1.0 reads "1".
        self.label = self.value.to_string();
        debug!("{} set to {}", self.name, self.label);
    }

    /// Parses user input the way a range input would accept it.
    pub fn set_from_str(&mut self, input: &str) -> Result<()> {
        let value: f64 = input
            .trim()
            .parse()
            .map_err(|_| Error::invalid_control_value(&self.name, input))?;
        if !value.is_finite() {
            return Err(Error::invalid_control_value(&self.name, input));
        }
        self.set(value);
        Ok(())
    }

    fn decimals(&self) -> usize {
        (0..=MAX_STEP_DECIMALS)
            .find(|d| {
                let scaled = self.step * 10f64.powi(*d as i32);
                (scaled - scaled.round()).abs() < 1e-6
            })
            .unwrap_or(MAX_STEP_DECIMALS)
    }
}

/// The button that starts generation. Its enabled flag doubles as the
/// single-flight token: only the caller that flips it off may dispatch.
#[derive(Debug)]
pub struct TriggerControl {
    enabled: AtomicBool,
}

impl Default for TriggerControl {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }
}

impl TriggerControl {
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Disables the control if it is enabled. The returned guard re-enables
    /// it when dropped, on every exit path.
    pub fn try_disable(&self) -> Option<InFlightGuard<'_>> {
        self.enabled
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { trigger: self })
    }
}

#[derive(Debug)]
pub struct InFlightGuard<'a> {
    trigger: &'a TriggerControl,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.trigger.enabled.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn temperature() -> RangeControl {
        RangeControl::new(
            "temperature",
            &SliderConfig {
                min: 0.1,
                max: 1.0,
                step: 0.1,
                default: 0.7,
            },
        )
    }

    fn tokens() -> RangeControl {
        RangeControl::new(
            "max_tokens",
            &SliderConfig {
                min: 50.0,
                max: 500.0,
                step: 10.0,
                default: 150.0,
            },
        )
    }

    #[test]
    fn test_defaults_and_labels() {
        assert_eq!(temperature().value(), 0.7);
        assert_eq!(temperature().label(), "0.7");
        assert_eq!(tokens().as_integer(), 150);
        assert_eq!(tokens().label(), "150");
    }

    #[rstest]
    #[case(5.0, 1.0, "1")]
    #[case(-1.0, 0.1, "0.1")]
    #[case(0.34, 0.3, "0.3")]
    #[case(0.86, 0.9, "0.9")]
    fn test_temperature_clamps_and_snaps(
        #[case] input: f64,
        #[case] expected: f64,
        #[case] label: &str,
    ) {
        let mut control = temperature();
        control.set(input);
        assert_eq!(control.value(), expected);
        assert_eq!(control.label(), label);
    }

    #[rstest]
    #[case(1.0, "1")]
    #[case(0.5, "0.5")]
    #[case(1.33, "1.35")]
    fn test_label_uses_shortest_form(#[case] input: f64, #[case] label: &str) {
        let mut control = RangeControl::new(
            "temperature",
            &SliderConfig {
                min: 0.0,
                max: 2.0,
                step: 0.05,
                default: 0.0,
            },
        );
        control.set(input);
        assert_eq!(control.label(), label);
    }

    #[rstest]
    #[case("10", 50)]
    #[case("1000", 500)]
    #[case("234", 230)]
    #[case(" 275 ", 280)]
    fn test_tokens_from_text(#[case] input: &str, #[case] expected: u32) {
        let mut control = tokens();
        control.set_from_str(input).unwrap();
        assert_eq!(control.as_integer(), expected);
        assert_eq!(control.label(), expected.to_string());
    }

    #[rstest]
    #[case("lots")]
    #[case("")]
    #[case("NaN")]
    #[case("inf")]
    fn test_invalid_text_leaves_value_unchanged(#[case] input: &str) {
        let mut control = tokens();
        let err = control.set_from_str(input).unwrap_err();
        assert!(matches!(err, Error::InvalidControlValue { .. }));
        assert_eq!(control.as_integer(), 150);
    }

    #[test]
    fn test_topic_field_keeps_exact_text() {
        let field = TopicField::default();
        field.set_text("  space cats  ");
        assert_eq!(field.text(), "  space cats  ");
    }

    #[test]
    fn test_trigger_guard_reenables_on_drop() {
        let trigger = TriggerControl::default();
        assert!(trigger.is_enabled());
        {
            let _guard = trigger.try_disable().unwrap();
            assert!(!trigger.is_enabled());
            assert!(trigger.try_disable().is_none());
        }
        assert!(trigger.is_enabled());
    }

    #[test]
    fn test_trigger_reenabled_after_panic() {
        let trigger = TriggerControl::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = trigger.try_disable().unwrap();
            panic!("renderer blew up");
        }));
        assert!(result.is_err());
        assert!(trigger.is_enabled());
    }
}
