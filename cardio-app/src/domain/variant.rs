use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainError,
    vitals::{ChestPain, RestingEcg, Sex, StSlope, Thal, YesNo},
};

/// The two page layouts served by the application. They share the feature
/// encoding and differ in wording, the `ca` choices, and what the feedback
/// email carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    #[default]
    Classic,
    Bilingual,
}

pub struct FieldLabels {
    pub age: &'static str,
    pub sex: &'static str,
    pub cp: &'static str,
    pub trestbps: &'static str,
    pub chol: &'static str,
    pub fbs: &'static str,
    pub restecg: &'static str,
    pub thalach: &'static str,
    pub exang: &'static str,
    pub oldpeak: &'static str,
    pub slope: &'static str,
    pub ca: &'static str,
    pub thal: &'static str,
}

const CLASSIC_LABELS: FieldLabels = FieldLabels {
    age: "العمر (Age)",
    sex: "الجنس (Sex)",
    cp: "نوع ألم الصدر (CP)",
    trestbps: "ضغط الدم (trestbps)",
    chol: "الكوليسترول (chol)",
    fbs: "سكر الدم > 120 mg/dl (fbs)",
    restecg: "نتائج تخطيط القلب (restecg)",
    thalach: "أقصى نبض للقلب (thalach)",
    exang: "ذبحة صدرية مع التمرين (exang)",
    oldpeak: "انخفاض ST (oldpeak)",
    slope: "ميل مقطع ST (slope)",
    ca: "عدد الأوعية الرئيسية (ca)",
    thal: "حالة الثلاسيميا (thal)",
};

const BILINGUAL_LABELS: FieldLabels = FieldLabels {
    age: "العمر (Age)",
    sex: "الجنس (Sex)",
    cp: "Chest Pain Type - نوع ألم الصدر(CP)",
    trestbps: "Resting Blood Pressure - ضغط الدم الانقباضي وقت الراحة (trestbps)",
    chol: "Serum Cholesterol Level - مستوى الكوليسترول في الدم (chol)",
    fbs: "سكر الدم اثناء الصيام > 120 mg/dl (fbs)",
    restecg: "Resting Electrocardiogram Results - نتائج تخطيط القلب الكهربائي وقت الراحة (restecg)",
    thalach: "أقصى معدل نبض (أثناء اختبار الجهد) - Maximum Heart Rate Achieved",
    exang: "ذبحة صدرية مع التمرين (exang)",
    oldpeak: "قيمة انخفاض مقطع ST(oldpeak)",
    slope: "ميل المقطع ST في ذروة التمرين (Slope of the Peak Exercise ST Segment)",
    ca: "عدد الشرايين المسدودة(ca)",
    thal: "Thallium Stress Test Result - نتيجة اختبار إجهاد الثاليوم النووي",
};

impl FormVariant {
    pub const ALL: [FormVariant; 2] = [FormVariant::Classic, FormVariant::Bilingual];

    pub fn as_str(self) -> &'static str {
        match self {
            FormVariant::Classic => "classic",
            FormVariant::Bilingual => "bilingual",
        }
    }

    pub fn labels(self) -> &'static FieldLabels {
        match self {
            FormVariant::Classic => &CLASSIC_LABELS,
            FormVariant::Bilingual => &BILINGUAL_LABELS,
        }
    }

    pub fn max_major_vessels(self) -> u8 {
        match self {
            FormVariant::Classic => 4,
            FormVariant::Bilingual => 3,
        }
    }

    /// Extra heading shown under the title.
    pub fn banner(self) -> Option<&'static str> {
        match self {
            FormVariant::Classic => None,
            FormVariant::Bilingual => Some("Created By Haider Abduljalil"),
        }
    }

    pub fn sex_caption(self, sex: Sex) -> &'static str {
        match (self, sex) {
            (FormVariant::Classic, Sex::Male) => "ذكر",
            (FormVariant::Classic, Sex::Female) => "أنثى",
            (FormVariant::Bilingual, Sex::Male) => "Male",
            (FormVariant::Bilingual, Sex::Female) => "Female",
        }
    }

    pub fn yes_no_caption(self, answer: YesNo) -> &'static str {
        match (self, answer) {
            (FormVariant::Classic, YesNo::Yes) => "نعم",
            (FormVariant::Classic, YesNo::No) => "لا",
            (FormVariant::Bilingual, YesNo::Yes) => "Yes",
            (FormVariant::Bilingual, YesNo::No) => "No",
        }
    }

    pub fn disclaimer(self) -> &'static str {
        match self {
            FormVariant::Classic => {
                "إخلاء مسؤولية: هذا النموذج هو أداة تعليمية وتجريبية ولا يغني عن الاستشارة الطبية المتخصصة. \
                 النتائج المقدمة هي تنبؤات بناءً على البيانات المدخلة ولا يجب اعتبارها تشخيصًا نهائيًا."
            }
            FormVariant::Bilingual => {
                "تنبيه: هذا النموذج هو أداة تعليمية وتجريبية ولا يغني عن الاستشارة الطبية المتخصصة. \
                 النتائج المقدمة هي تنبؤات بناءً على البيانات المدخلة ولا يجب اعتبارها تشخيصًا نهائيًا."
            }
        }
    }

    pub fn feedback_heading(self) -> &'static str {
        match self {
            FormVariant::Classic => "📬 هل لديك ملاحظة أو اقتراح؟",
            FormVariant::Bilingual => "📬 اكتب ملاحظة او رسالة",
        }
    }

    pub fn feedback_subject(self) -> &'static str {
        match self {
            FormVariant::Classic => "رسالة جديدة + بيانات الموقع 🌍",
            FormVariant::Bilingual => "رسالة جديدة من تطبيق أمراض القلب",
        }
    }

    /// Whether the feedback email carries the sender's address and location.
    pub fn includes_sender_info(self) -> bool {
        matches!(self, FormVariant::Classic)
    }

    pub fn missing_secrets_message(self) -> &'static str {
        match self {
            FormVariant::Classic => {
                "خطأ: لم يتم العثور على أسرار الإيميل (email/password) في إعدادات التطبيق."
            }
            FormVariant::Bilingual => {
                "خطأ في إعدادات الخادم: لم يتم العثور على أسرار البريد الإلكتروني."
            }
        }
    }

    pub fn send_failure_prefix(self) -> &'static str {
        match self {
            FormVariant::Classic => "عفوًا، حدث خطأ أثناء الإرسال",
            FormVariant::Bilingual => "عفوًا، حدث خطأ أثناء محاولة إرسال الرسالة",
        }
    }
}

pub fn chest_pain_caption(cp: ChestPain) -> &'static str {
    match cp {
        ChestPain::TypicalAngina => "Typical Angina",
        ChestPain::AtypicalAngina => "Atypical Angina",
        ChestPain::NonAnginalPain => "Non-anginal Pain",
        ChestPain::Asymptomatic => "Asymptomatic",
    }
}

pub fn resting_ecg_caption(ecg: RestingEcg) -> &'static str {
    match ecg {
        RestingEcg::Normal => "Normal",
        RestingEcg::StTWaveAbnormality => "ST-T wave abnormality",
        RestingEcg::Hypertrophy => "Hypertrophy",
    }
}

pub fn st_slope_caption(slope: StSlope) -> &'static str {
    match slope {
        StSlope::Upsloping => "Upsloping",
        StSlope::Flat => "Flat",
        StSlope::Downsloping => "Downsloping",
    }
}

pub fn thal_caption(thal: Thal) -> &'static str {
    match thal {
        Thal::Normal => "Normal",
        Thal::FixedDefect => "Fixed defect",
        Thal::ReversibleDefect => "Reversible defect",
    }
}

impl fmt::Display for FormVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(FormVariant::Classic),
            "bilingual" => Ok(FormVariant::Bilingual),
            other => Err(DomainError::UnknownVariant(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variant() {
        assert_eq!(
            " Bilingual ".parse::<FormVariant>().ok(),
            Some(FormVariant::Bilingual)
        );
        assert!(matches!(
            "modern".parse::<FormVariant>(),
            Err(DomainError::UnknownVariant(name)) if name == "modern"
        ));
    }

    #[test]
    fn test_only_classic_reports_sender_info() {
        assert!(FormVariant::Classic.includes_sender_info());
        assert!(!FormVariant::Bilingual.includes_sender_info());
    }
}
