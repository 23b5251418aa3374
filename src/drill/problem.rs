//! Percentage-change problems: generation, display descriptor, validation.
//!
//! A problem is built from four random choices (original value, percent,
//! direction, kind). The changed value, the answer and the diagram payload
//! are derived from those choices by [`Problem::new`], so a
//! stored problem can be re-derived and compared against itself to detect
//! tampering or corruption.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{
    ORIGINAL_MAX, ORIGINAL_MIN, ORIGINAL_STEP, PERCENT_MAX, PERCENT_MIN, PERCENT_STEP,
};

pub const LEFT_LABEL: &str = "Old";
pub const MID_LABEL: &str = "% Change";
pub const RIGHT_LABEL: &str = "New";

/// Placeholder shown in place of the hidden quantity.
pub const PLACEHOLDER: &str = "?";

/// Which quantity is hidden and must be solved for.
///
/// On the wire this is the numeric tag `type` (0, 1, 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProblemKind {
    FindNew,
    FindOriginal,
    FindPercent,
}

impl ProblemKind {
    pub const ALL: [ProblemKind; 3] = [
        ProblemKind::FindNew,
        ProblemKind::FindOriginal,
        ProblemKind::FindPercent,
    ];

    /// Name stored in `display.mode`.
    pub fn mode_name(self) -> &'static str {
        match self {
            ProblemKind::FindNew => "findNew",
            ProblemKind::FindOriginal => "findOld",
            ProblemKind::FindPercent => "findPercent",
        }
    }

    fn from_mode_name(name: &str) -> Option<Self> {
        match name {
            "findNew" => Some(ProblemKind::FindNew),
            "findOld" => Some(ProblemKind::FindOriginal),
            "findPercent" => Some(ProblemKind::FindPercent),
            _ => None,
        }
    }
}

impl From<ProblemKind> for u8 {
    fn from(kind: ProblemKind) -> u8 {
        match kind {
            ProblemKind::FindNew => 0,
            ProblemKind::FindOriginal => 1,
            ProblemKind::FindPercent => 2,
        }
    }
}

impl TryFrom<u8> for ProblemKind {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(ProblemKind::FindNew),
            1 => Ok(ProblemKind::FindOriginal),
            2 => Ok(ProblemKind::FindPercent),
            other => Err(format!("unknown problem type {other}")),
        }
    }
}

/// A left/right diagram value: a number, or the `?` placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SlotRepr", into = "SlotRepr")]
pub enum Slot {
    Value(u32),
    Hidden,
}

impl Slot {
    pub fn text(self) -> String {
        match self {
            Slot::Value(v) => v.to_string(),
            Slot::Hidden => PLACEHOLDER.to_string(),
        }
    }
}

/// Stored form: a JSON number, or the string `"?"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SlotRepr {
    Number(u32),
    Text(String),
}

impl From<Slot> for SlotRepr {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Value(v) => SlotRepr::Number(v),
            Slot::Hidden => SlotRepr::Text(PLACEHOLDER.to_string()),
        }
    }
}

impl TryFrom<SlotRepr> for Slot {
    type Error = String;

    fn try_from(repr: SlotRepr) -> Result<Self, Self::Error> {
        match repr {
            SlotRepr::Number(v) => Ok(Slot::Value(v)),
            SlotRepr::Text(t) if t == PLACEHOLDER => Ok(Slot::Hidden),
            SlotRepr::Text(t) => t
                .parse()
                .map(Slot::Value)
                .map_err(|_| format!("invalid diagram value {t:?}")),
        }
    }
}

/// Precomputed rendering payload for the three-box diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    pub old: Slot,
    pub mid: String,
    pub new: Slot,
    #[serde(with = "mode_name")]
    pub mode: ProblemKind,
}

/// One box of the diagram as the renderer sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramBox {
    pub label: &'static str,
    pub text: String,
    /// The box contains the placeholder.
    pub hidden: bool,
}

impl Display {
    /// Left, middle and right boxes in drawing order.
    pub fn boxes(&self) -> [DiagramBox; 3] {
        [
            DiagramBox {
                label: LEFT_LABEL,
                text: self.old.text(),
                hidden: self.old == Slot::Hidden,
            },
            DiagramBox {
                label: MID_LABEL,
                text: self.mid.clone(),
                hidden: self.mid.contains(PLACEHOLDER),
            },
            DiagramBox {
                label: RIGHT_LABEL,
                text: self.new.text(),
                hidden: self.new == Slot::Hidden,
            },
        ]
    }
}

mod mode_name {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ProblemKind;

    pub fn serialize<S: Serializer>(kind: &ProblemKind, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(kind.mode_name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ProblemKind, D::Error> {
        let name = String::deserialize(d)?;
        ProblemKind::from_mode_name(&name)
            .ok_or_else(|| D::Error::custom(format!("unknown display mode {name:?}")))
    }
}

/// One generated exercise. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "old")]
    pub original: u32,
    #[serde(rename = "new")]
    pub changed_value: u32,
    pub percent: u32,
    pub is_increase: bool,
    #[serde(rename = "type")]
    pub kind: ProblemKind,
    /// Signed for [`ProblemKind::FindPercent`].
    pub answer: i32,
    pub display: Display,
}

/// `round(original * (1 ± percent/100))`.
pub fn changed_value(original: u32, percent: u32, is_increase: bool) -> u32 {
    let ratio = percent as f64 / 100.0;
    let factor = if is_increase { 1.0 + ratio } else { 1.0 - ratio };
    (original as f64 * factor).round() as u32
}

impl Problem {
    /// Derive the full problem from its four choices.
    pub fn new(original: u32, percent: u32, is_increase: bool, kind: ProblemKind) -> Self {
        let changed = changed_value(original, percent, is_increase);
        let sign = if is_increase { "+" } else { "-" };
        let factor_text = format!("( 1 {} {}% )", sign, percent);

        let (answer, display) = match kind {
            ProblemKind::FindNew => (
                changed as i32,
                Display {
                    old: Slot::Value(original),
                    mid: factor_text,
                    new: Slot::Hidden,
                    mode: kind,
                },
            ),
            ProblemKind::FindOriginal => (
                original as i32,
                Display {
                    old: Slot::Hidden,
                    mid: factor_text,
                    new: Slot::Value(changed),
                    mode: kind,
                },
            ),
            // Always "+": a decrease must be answered with a negative number.
            ProblemKind::FindPercent => (
                if is_increase { percent as i32 } else { -(percent as i32) },
                Display {
                    old: Slot::Value(original),
                    mid: format!("( 1 + {} % )", PLACEHOLDER),
                    new: Slot::Value(changed),
                    mode: kind,
                },
            ),
        };

        Self {
            original,
            changed_value: changed,
            percent,
            is_increase,
            kind,
            answer,
            display,
        }
    }

    /// True when the choices are inside the generator's domain and every
    /// derived field matches what [`Problem::new`] would produce.
    pub fn is_consistent(&self) -> bool {
        in_domain(self.original, ORIGINAL_MIN, ORIGINAL_MAX, ORIGINAL_STEP)
            && in_domain(self.percent, PERCENT_MIN, PERCENT_MAX, PERCENT_STEP)
            && *self == Problem::new(self.original, self.percent, self.is_increase, self.kind)
    }
}

fn in_domain(value: u32, min: u32, max: u32, step: u32) -> bool {
    (min..=max).contains(&value) && (value - min) % step == 0
}

fn pick_stepped<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32, step: u32) -> u32 {
    min + rng.random_range(0..=(max - min) / step) * step
}

/// Generate a random problem. Never fails.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Problem {
    let kind = ProblemKind::ALL[rng.random_range(0..ProblemKind::ALL.len())];
    let original = pick_stepped(rng, ORIGINAL_MIN, ORIGINAL_MAX, ORIGINAL_STEP);
    let percent = pick_stepped(rng, PERCENT_MIN, PERCENT_MAX, PERCENT_STEP);
    let is_increase = rng.random_bool(0.5);
    Problem::new(original, percent, is_increase, kind)
}
