//! Straight-line trip distance classes.
//!
//! Five right-open bins in metres.  A boundary value belongs to the higher
//! bin: exactly 1000 m is `"1-3"`, not `"<1"`.
//!
//! | Class        | Range (m)          | Label  |
//! |--------------|--------------------|--------|
//! | `UnderOne`   | `[0, 1000)`        | `<1`   |
//! | `OneToThree` | `[1000, 3000)`     | `1-3`  |
//! | `ThreeToFive`| `[3000, 5000)`     | `3-5`  |
//! | `FiveToTen`  | `[5000, 10000)`    | `5-10` |
//! | `OverTen`    | `[10000, ∞)`       | `>10`  |

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceClass {
    UnderOne,
    OneToThree,
    ThreeToFive,
    FiveToTen,
    OverTen,
}

impl DistanceClass {
    /// Every class in ascending order.  Reports always carry all five.
    pub const ALL: [DistanceClass; 5] = [
        DistanceClass::UnderOne,
        DistanceClass::OneToThree,
        DistanceClass::ThreeToFive,
        DistanceClass::FiveToTen,
        DistanceClass::OverTen,
    ];

    pub fn classify(distance_m: f64) -> Self {
        if distance_m < 1_000.0 {
            DistanceClass::UnderOne
        } else if distance_m < 3_000.0 {
            DistanceClass::OneToThree
        } else if distance_m < 5_000.0 {
            DistanceClass::ThreeToFive
        } else if distance_m < 10_000.0 {
            DistanceClass::FiveToTen
        } else {
            DistanceClass::OverTen
        }
    }

    /// Report label (kilometres).
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceClass::UnderOne    => "<1",
            DistanceClass::OneToThree  => "1-3",
            DistanceClass::ThreeToFive => "3-5",
            DistanceClass::FiveToTen   => "5-10",
            DistanceClass::OverTen     => ">10",
        }
    }

    /// Dense index into a `[_; 5]` table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for DistanceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
