use fastrand::Rng;

const WORDS: [&str; 4] = ["str1", "str2", "ring", "queue"];

/// A payload of one of several shapes, so the buffer is exercised with mixed values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Item {
    Int(i64),
    Float(f64),
    Str(&'static str),
    Bool(bool),
}

impl Item {
    pub fn random(rng: &mut Rng) -> Self {
        match rng.u8(..4) {
            0 => Self::Int(rng.i64(..)),
            1 => Self::Float(rng.f64()),
            2 => Self::Str(WORDS[rng.usize(..WORDS.len())]),
            _ => Self::Bool(rng.bool()),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bool(_) => "bool",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Enqueue,
    Dequeue,
}

impl Decision {
    pub fn random(rng: &mut Rng) -> Self {
        if rng.bool() {
            Self::Enqueue
        } else {
            Self::Dequeue
        }
    }
}
