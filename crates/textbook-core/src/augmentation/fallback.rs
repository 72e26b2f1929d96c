//! Substitute results used when the backend cannot answer.

use crate::profile::ExperienceLevel;

/// Outcome of a backend call that always yields a value.
///
/// `Fallback` carries the locally generated substitute together with the
/// reason the live value was not available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Live(T),
    Fallback { value: T, cause: String },
}

impl<T> Fetched<T> {
    /// Keeps a success as `Live`; turns a failure into `Fallback` using `substitute`.
    pub fn from_result<E: std::fmt::Display>(
        result: Result<T, E>,
        substitute: impl FnOnce() -> T,
    ) -> Self {
        match result {
            Ok(value) => Self::Live(value),
            Err(e) => Self::Fallback {
                value: substitute(),
                cause: e.to_string(),
            },
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Live(value) => Fetched::Live(f(value)),
            Self::Fallback { value, cause } => Fetched::Fallback {
                value: f(value),
                cause,
            },
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Live(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Live(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::Live(_) => None,
            Self::Fallback { cause, .. } => Some(cause),
        }
    }
}

const BEGINNER_BLURB: &str = "This chapter introduces how robots sense, think and act in the physical world. \
Start with the big picture: sensors turn light, sound and motion into numbers, a controller decides what to do \
with those numbers, and motors carry out the decision. Read the examples slowly, run the short Python snippets, \
and do not worry about the math yet. Every new term is explained the first time it appears.";

const INTERMEDIATE_BLURB: &str = "This chapter connects perception, planning and control into one loop. \
You already know the basic building blocks, so focus on how data flows between them: sensor messages published \
over ROS 2 topics, state estimation that fuses noisy readings, and controllers that track a reference trajectory. \
Try modifying the example nodes and observe how latency and sensor noise change the robot's behaviour.";

const ADVANCED_BLURB: &str = "This chapter treats the sense-plan-act loop as a coupled estimation and control \
problem. Pay attention to the modelling assumptions behind each method: observability of the state estimator, \
stability margins of the whole-body controller, and the sim-to-real gap introduced by contact dynamics. \
The implementation notes point to where real-time constraints and hardware limits force trade-offs away from \
the textbook formulation.";

/// Canned personalization shown when the backend is unreachable.
pub fn personalize_fallback(level: ExperienceLevel) -> &'static str {
    match level {
        ExperienceLevel::Beginner => BEGINNER_BLURB,
        ExperienceLevel::Intermediate => INTERMEDIATE_BLURB,
        ExperienceLevel::Advanced => ADVANCED_BLURB,
    }
}

/// Canned Urdu passage shown when translation is unavailable.
pub const TRANSLATE_FALLBACK: &str = "یہ باب اس بات کا تعارف کراتا ہے کہ روبوٹ حقیقی دنیا کو کیسے محسوس کرتے ہیں، \
سوچتے ہیں اور عمل کرتے ہیں۔ سینسر روشنی، آواز اور حرکت کو اعداد میں بدلتے ہیں، کنٹرولر ان اعداد کی بنیاد پر فیصلہ کرتا ہے، \
اور موٹریں اس فیصلے پر عمل کرتی ہیں۔ Python اور ROS 2 کی مثالیں انگریزی میں رکھی گئی ہیں تاکہ آپ انہیں براہ راست چلا سکیں۔ \
مکمل ترجمہ اس وقت دستیاب نہیں ہے، براہ کرم کچھ دیر بعد دوبارہ کوشش کریں۔";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result_keeps_success() {
        let fetched: Fetched<String> =
            Fetched::from_result(Ok::<_, String>("live".to_string()), || "canned".to_string());
        assert_eq!(fetched, Fetched::Live("live".to_string()));
        assert!(!fetched.is_fallback());
        assert_eq!(fetched.cause(), None);
    }

    #[test]
    fn test_from_result_substitutes_on_failure() {
        let fetched = Fetched::from_result(Err::<String, _>("HTTP 500"), || "canned".to_string());
        assert!(fetched.is_fallback());
        assert_eq!(fetched.value(), "canned");
        assert_eq!(fetched.cause(), Some("HTTP 500"));
        assert_eq!(fetched.clone().into_value(), "canned");

        let mapped = fetched.map(|v| v.len());
        assert_eq!(mapped.cause(), Some("HTTP 500"));
        assert_eq!(*mapped.value(), 6);
    }

    #[test]
    fn test_each_level_has_its_own_blurb() {
        let beginner = personalize_fallback(ExperienceLevel::Beginner);
        let intermediate = personalize_fallback(ExperienceLevel::Intermediate);
        let advanced = personalize_fallback(ExperienceLevel::Advanced);
        assert_ne!(beginner, intermediate);
        assert_ne!(intermediate, advanced);
        assert_ne!(beginner, advanced);
    }
}
