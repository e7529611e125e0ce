use std::fmt::Write;

use cardio_app::domain::{
    prediction::{DiagnosisClass, Prediction},
    variant::{
        FormVariant, chest_pain_caption, resting_ecg_caption, st_slope_caption, thal_caption,
    },
    vitals::{
        AGE_RANGE, CHOLESTEROL_RANGE, ChestPain, MAX_HEART_RATE_RANGE, PatientVitals,
        RESTING_BP_RANGE, RestingEcg, ST_DEPRESSION_RANGE, Sex, StSlope, Thal, VitalsInput, YesNo,
    },
};

const PAGE_TITLE: &str = "تنبؤ بأمراض القلب";
const HEADING: &str = "🩺 نموذج التنبؤ بأمراض القلب";
const INTRO: &str = "أدخل بيانات المريض للتنبؤ باحتمالية الإصابة بأمراض القلب.";
const PREDICT_BUTTON: &str = "الحصول على التنبؤ";
const RESULTS_HEADING: &str = "نتائج التنبؤ:";
const MESSAGE_PLACEHOLDER: &str = "اكتب رسالتك هنا...";
const SEND_BUTTON: &str = "إرسال الرسالة";

pub const EMPTY_FEEDBACK: &str = "الرجاء كتابة رسالة قبل الإرسال.";
pub const FEEDBACK_SENT: &str = "تم إرسال رسالتك بنجاح! شكرًا لك.";

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:0 auto;padding:1rem}\
.cols{display:grid;grid-template-columns:repeat(3,1fr);gap:1rem}\
label{display:block;margin:.5rem 0}\
input,select,textarea{width:100%}\
.notice{padding:.75rem;border-radius:.5rem;margin:.75rem 0}\
.success{background:#e6f4ea}.error{background:#fde8e8}.warning{background:#fff4e5}\
footer{text-align:center}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Warning => "warning",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn for_prediction(prediction: &Prediction) -> Self {
        let percent = prediction.confidence_percent();
        match prediction.class {
            DiagnosisClass::Positive => Notice::new(
                NoticeKind::Error,
                format!(
                    "النتيجة: يوجد احتمالية عالية للإصابة بمرض في القلب. (احتمال بنسبة {}%)",
                    percent
                ),
            ),
            DiagnosisClass::Negative => Notice::new(
                NoticeKind::Success,
                format!(
                    "النتيجة: الاحتمالية منخفضة للإصابة بمرض في القلب. (احتمال بنسبة {}%)",
                    percent
                ),
            ),
        }
    }
}

/// Everything needed to draw one page.
pub struct PageView<'a> {
    pub variant: FormVariant,
    pub footer_credit: Option<&'a str>,
    pub values: VitalsInput,
    pub result: Option<Notice>,
    pub feedback: Option<Notice>,
    pub feedback_text: &'a str,
}

impl<'a> PageView<'a> {
    pub fn new(variant: FormVariant, footer_credit: Option<&'a str>) -> Self {
        Self {
            variant,
            footer_credit,
            values: VitalsInput::from(&PatientVitals::default()),
            result: None,
            feedback: None,
            feedback_text: "",
        }
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn slider<T: std::fmt::Display>(
    out: &mut String,
    name: &str,
    label: &str,
    (min, max, _): (T, T, T),
    step: &str,
    value: T,
) {
    let _ = write!(
        out,
        "<label>{label}<input type=\"range\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" \
         oninput=\"this.nextElementSibling.value=this.value\"><output>{value}</output></label>",
        label = escape(label),
    );
}

fn select<'o>(
    out: &mut String,
    name: &str,
    label: &str,
    selected: u8,
    options: impl IntoIterator<Item = (u8, &'o str)>,
) {
    let _ = write!(out, "<label>{}<select name=\"{}\">", escape(label), name);
    for (code, caption) in options {
        let marker = if code == selected { " selected" } else { "" };
        let _ = write!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            code,
            marker,
            escape(caption)
        );
    }
    out.push_str("</select></label>");
}

fn notice(out: &mut String, notice: &Notice) {
    let _ = write!(
        out,
        "<div class=\"notice {}\" role=\"status\">{}</div>",
        notice.kind.class(),
        escape(&notice.text)
    );
}

fn vitals_form(out: &mut String, variant: FormVariant, v: &VitalsInput) {
    let labels = variant.labels();
    let _ = write!(
        out,
        "<form method=\"post\" action=\"/predict?variant={}\"><div class=\"cols\"><div>",
        variant
    );
    slider(out, "age", labels.age, AGE_RANGE, "1", v.age);
    select(
        out,
        "sex",
        labels.sex,
        v.sex,
        Sex::ALL.iter().map(|s| (s.code(), variant.sex_caption(*s))),
    );
    select(
        out,
        "cp",
        labels.cp,
        v.cp,
        ChestPain::ALL.iter().map(|c| (c.code(), chest_pain_caption(*c))),
    );
    out.push_str("</div><div>");
    slider(out, "trestbps", labels.trestbps, RESTING_BP_RANGE, "1", v.trestbps);
    slider(out, "chol", labels.chol, CHOLESTEROL_RANGE, "1", v.chol);
    select(
        out,
        "fbs",
        labels.fbs,
        v.fbs,
        YesNo::ALL.iter().map(|a| (a.code(), variant.yes_no_caption(*a))),
    );
    out.push_str("</div><div>");
    select(
        out,
        "restecg",
        labels.restecg,
        v.restecg,
        RestingEcg::ALL.iter().map(|e| (e.code(), resting_ecg_caption(*e))),
    );
    slider(out, "thalach", labels.thalach, MAX_HEART_RATE_RANGE, "1", v.thalach);
    select(
        out,
        "exang",
        labels.exang,
        v.exang,
        YesNo::ALL.iter().map(|a| (a.code(), variant.yes_no_caption(*a))),
    );
    out.push_str("</div></div>");
    slider(out, "oldpeak", labels.oldpeak, ST_DEPRESSION_RANGE, "0.1", v.oldpeak);
    select(
        out,
        "slope",
        labels.slope,
        v.slope,
        StSlope::ALL.iter().map(|s| (s.code(), st_slope_caption(*s))),
    );
    let vessel_captions: Vec<String> = (0..=variant.max_major_vessels())
        .map(|n| n.to_string())
        .collect();
    select(
        out,
        "ca",
        labels.ca,
        v.ca,
        vessel_captions
            .iter()
            .enumerate()
            .map(|(n, caption)| (n as u8, caption.as_str())),
    );
    select(
        out,
        "thal",
        labels.thal,
        v.thal,
        Thal::ALL.iter().map(|t| (t.code(), thal_caption(*t))),
    );
    let _ = write!(out, "<button type=\"submit\">{}</button></form>", PREDICT_BUTTON);
}

fn feedback_form(out: &mut String, view: &PageView<'_>) {
    let _ = write!(
        out,
        "<hr><h2>{}</h2><form method=\"post\" action=\"/feedback?variant={}\">\
         <textarea name=\"message\" rows=\"6\" placeholder=\"{}\">{}</textarea>\
         <button type=\"submit\">{}</button></form>",
        escape(view.variant.feedback_heading()),
        view.variant,
        MESSAGE_PLACEHOLDER,
        escape(view.feedback_text),
        SEND_BUTTON
    );
    if let Some(n) = &view.feedback {
        notice(out, n);
    }
}

pub fn render_page(view: &PageView<'_>) -> String {
    let variant = view.variant;
    let mut out = String::with_capacity(16 * 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"ar\" dir=\"rtl\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><style>{}</style></head><body><h1>{}</h1>",
        PAGE_TITLE, STYLE, HEADING
    );
    if let Some(banner) = variant.banner() {
        let _ = write!(out, "<h1>{}</h1>", escape(banner));
    }
    let _ = write!(out, "<p>{}</p>", INTRO);

    vitals_form(&mut out, variant, &view.values);

    if let Some(result) = &view.result {
        let _ = write!(out, "<section id=\"result\"><h3>{}</h3>", RESULTS_HEADING);
        notice(&mut out, result);
        out.push_str("</section>");
    }

    out.push_str("<hr>");
    notice(
        &mut out,
        &Notice::new(NoticeKind::Warning, variant.disclaimer()),
    );

    let credit = view.footer_credit.map(escape);
    if variant == FormVariant::Bilingual {
        if let Some(credit) = &credit {
            let _ = write!(out, "<p class=\"credit\">{}</p>", credit);
        }
    }

    feedback_form(&mut out, view);

    out.push_str("<footer>");
    if variant == FormVariant::Classic {
        if let Some(credit) = &credit {
            let _ = write!(out, "<p class=\"credit\">{}</p>", credit);
        }
        out.push_str("<hr>");
        notice(
            &mut out,
            &Notice::new(NoticeKind::Warning, variant.disclaimer()),
        );
    }
    out.push_str("</footer></body></html>");
    out
}

#[cfg(test)]
mod tests {
    use cardio_app::domain::prediction::ClassProbabilities;

    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>alert(\"x\")</script>&'"),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_vessel_choices_follow_variant() {
        let classic = render_page(&PageView::new(FormVariant::Classic, None));
        assert!(classic.contains("<option value=\"4\">4</option>"));
        let bilingual = render_page(&PageView::new(FormVariant::Bilingual, None));
        assert!(!bilingual.contains("<option value=\"4\">4</option>"));
        assert!(bilingual.contains("<option value=\"3\">3</option>"));
        assert!(bilingual.contains("Created By Haider Abduljalil"));
    }

    #[test]
    fn test_submitted_values_are_kept() {
        let mut view = PageView::new(FormVariant::Classic, None);
        view.values.thal = 3;
        view.values.age = 71;
        let html = render_page(&view);
        assert!(html.contains("<option value=\"3\" selected>Reversible defect</option>"));
        assert!(html.contains("name=\"age\" min=\"20\" max=\"100\" step=\"1\" value=\"71\""));
    }

    #[test]
    fn test_result_notice_styles() {
        let positive = Prediction::from_probabilities(ClassProbabilities::from_positive(0.9));
        let n = Notice::for_prediction(&positive);
        assert_eq!(n.kind, NoticeKind::Error);
        assert!(n.text.contains("90.00%"));

        let negative = Prediction::from_probabilities(ClassProbabilities::from_positive(0.1));
        let n = Notice::for_prediction(&negative);
        assert_eq!(n.kind, NoticeKind::Success);
        assert!(n.text.contains("90.00%"));
    }

    #[test]
    fn test_feedback_text_is_escaped() {
        let mut view = PageView::new(FormVariant::Bilingual, Some("Made by <me>"));
        view.feedback_text = "</textarea><b>";
        let html = render_page(&view);
        assert!(html.contains("&lt;/textarea&gt;&lt;b&gt;"));
        assert!(html.contains("Made by &lt;me&gt;"));
    }
}
