use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{DomainError, variant::FormVariant};

pub const FEATURE_COUNT: usize = 13;

/// Column order the classifier was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

pub const AGE_RANGE: (u32, u32, u32) = (20, 100, 50);
pub const RESTING_BP_RANGE: (u32, u32, u32) = (90, 200, 120);
pub const CHOLESTEROL_RANGE: (u32, u32, u32) = (100, 600, 200);
pub const MAX_HEART_RATE_RANGE: (u32, u32, u32) = (70, 220, 150);
pub const ST_DEPRESSION_RANGE: (f64, f64, f64) = (0.0, 6.2, 1.0);

macro_rules! coded_enum {
    ($name:ident, $field:literal, { $($variant:ident = $code:literal),+ $(,)? }) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = DomainError;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    _ => Err(DomainError::UnknownCode { field: $field, code }),
                }
            }
        }
    };
}

coded_enum!(Sex, "sex", { Male = 1, Female = 0 });
coded_enum!(ChestPain, "cp", {
    TypicalAngina = 0,
    AtypicalAngina = 1,
    NonAnginalPain = 2,
    Asymptomatic = 3,
});
coded_enum!(YesNo, "yes/no", { Yes = 1, No = 0 });
coded_enum!(RestingEcg, "restecg", {
    Normal = 0,
    StTWaveAbnormality = 1,
    Hypertrophy = 2,
});
coded_enum!(StSlope, "slope", { Upsloping = 0, Flat = 1, Downsloping = 2 });
coded_enum!(Thal, "thal", { Normal = 1, FixedDefect = 2, ReversibleDefect = 3 });

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatientVitals {
    pub age: u32,
    pub sex: Sex,
    pub chest_pain: ChestPain,
    pub resting_bp: u32,
    pub cholesterol: u32,
    pub fasting_blood_sugar: YesNo,
    pub resting_ecg: RestingEcg,
    pub max_heart_rate: u32,
    pub exercise_angina: YesNo,
    pub st_depression: f64,
    pub st_slope: StSlope,
    pub major_vessels: u8,
    pub thal: Thal,
}

impl Default for PatientVitals {
    fn default() -> Self {
        Self {
            age: AGE_RANGE.2,
            sex: Sex::Male,
            chest_pain: ChestPain::TypicalAngina,
            resting_bp: RESTING_BP_RANGE.2,
            cholesterol: CHOLESTEROL_RANGE.2,
            fasting_blood_sugar: YesNo::Yes,
            resting_ecg: RestingEcg::Normal,
            max_heart_rate: MAX_HEART_RATE_RANGE.2,
            exercise_angina: YesNo::Yes,
            st_depression: ST_DEPRESSION_RANGE.2,
            st_slope: StSlope::Upsloping,
            major_vessels: 0,
            thal: Thal::Normal,
        }
    }
}

/// Raw submission as posted by the form or the JSON endpoint. Field names
/// match the training columns.
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct VitalsInput {
    #[validate(range(min = 20, max = 100))]
    pub age: u32,
    pub sex: u8,
    pub cp: u8,
    #[validate(range(min = 90, max = 200))]
    pub trestbps: u32,
    #[validate(range(min = 100, max = 600))]
    pub chol: u32,
    pub fbs: u8,
    pub restecg: u8,
    #[validate(range(min = 70, max = 220))]
    pub thalach: u32,
    pub exang: u8,
    #[validate(range(min = 0.0, max = 6.2))]
    pub oldpeak: f64,
    pub slope: u8,
    pub ca: u8,
    pub thal: u8,
}

impl VitalsInput {
    pub fn into_vitals(self, variant: FormVariant) -> Result<PatientVitals, DomainError> {
        if !self.oldpeak.is_finite() {
            return Err(DomainError::InvalidInput(
                "oldpeak must be a finite number".to_string(),
            ));
        }
        self.validate()
            .map_err(|e| DomainError::InvalidInput(e.to_string()))?;
        let max_vessels = variant.max_major_vessels();
        if self.ca > max_vessels {
            return Err(DomainError::OutOfRange {
                field: "ca",
                value: self.ca as f64,
                max: max_vessels as f64,
            });
        }
        Ok(PatientVitals {
            age: self.age,
            sex: Sex::try_from(self.sex)?,
            chest_pain: ChestPain::try_from(self.cp)?,
            resting_bp: self.trestbps,
            cholesterol: self.chol,
            fasting_blood_sugar: YesNo::try_from(self.fbs)
                .map_err(|_| DomainError::UnknownCode { field: "fbs", code: self.fbs })?,
            resting_ecg: RestingEcg::try_from(self.restecg)?,
            max_heart_rate: self.thalach,
            exercise_angina: YesNo::try_from(self.exang)
                .map_err(|_| DomainError::UnknownCode { field: "exang", code: self.exang })?,
            st_depression: self.oldpeak,
            st_slope: StSlope::try_from(self.slope)?,
            major_vessels: self.ca,
            thal: Thal::try_from(self.thal)?,
        })
    }
}

impl From<&PatientVitals> for VitalsInput {
    fn from(vitals: &PatientVitals) -> Self {
        Self {
            age: vitals.age,
            sex: vitals.sex.code(),
            cp: vitals.chest_pain.code(),
            trestbps: vitals.resting_bp,
            chol: vitals.cholesterol,
            fbs: vitals.fasting_blood_sugar.code(),
            restecg: vitals.resting_ecg.code(),
            thalach: vitals.max_heart_rate,
            exang: vitals.exercise_angina.code(),
            oldpeak: vitals.st_depression,
            slope: vitals.st_slope.code(),
            ca: vitals.major_vessels,
            thal: vitals.thal.code(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<&PatientVitals> for FeatureVector {
    fn from(v: &PatientVitals) -> Self {
        FeatureVector([
            v.age as f64,
            v.sex.code() as f64,
            v.chest_pain.code() as f64,
            v.resting_bp as f64,
            v.cholesterol as f64,
            v.fasting_blood_sugar.code() as f64,
            v.resting_ecg.code() as f64,
            v.max_heart_rate as f64,
            v.exercise_angina.code() as f64,
            v.st_depression,
            v.st_slope.code() as f64,
            v.major_vessels as f64,
            v.thal.code() as f64,
        ])
    }
}
