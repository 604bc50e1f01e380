use crate::{
    api::{ApiError, RegistrationResponse},
    components::error::InlineErrorMessage,
    pages::register::utils::card_filename,
    utils::download::{trigger_download, SVG_MIME},
};
use leptos::*;
use qrcode::{render::svg, QrCode};

const NOT_SET: &str = "Not set";
const CARD_WIDTH: u32 = 440;
const CARD_HEIGHT: u32 = 260;
const QR_SIZE: u32 = 120;

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn qr_markup(student_id: &str) -> Result<String, String> {
    let code = QrCode::new(student_id.as_bytes()).map_err(|e| e.to_string())?;
    let rendered = code
        .render::<svg::Color>()
        .min_dimensions(QR_SIZE, QR_SIZE)
        .quiet_zone(false)
        .dark_color(svg::Color("#1f2937"))
        .light_color(svg::Color("#ffffff"))
        .build();
    // Drop the XML prolog so the QR can nest inside the card.
    rendered
        .find("<svg")
        .map(|start| rendered[start..].to_string())
        .ok_or_else(|| "QR renderer produced no SVG".to_string())
}

fn field(label: &str, value: &str, y: u32) -> String {
    format!(
        r##"<text x="28" y="{label_y}" font-size="11" fill="#6b7280" letter-spacing="1">{label}</text><text x="28" y="{value_y}" font-size="17" font-weight="600" fill="#111827">{value}</text>"##,
        label_y = y,
        value_y = y + 20,
        label = escape_xml(&label.to_uppercase()),
        value = escape_xml(value),
    )
}

/// Standalone SVG document of the student card with a QR code of the id.
pub fn student_card_svg(registration: &RegistrationResponse) -> Result<String, String> {
    let (meeting_id, password) = registration
        .meeting
        .as_ref()
        .map(|m| (m.meeting_id.as_str(), m.password.as_str()))
        .unwrap_or((NOT_SET, NOT_SET));
    let qr = qr_markup(&registration.student_id)?;

    let mut out = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Helvetica, Arial, sans-serif">"##,
        w = CARD_WIDTH,
        h = CARD_HEIGHT,
    );
    out.push_str(&format!(
        r##"<rect width="{w}" height="{h}" rx="20" fill="#ffffff" stroke="#e5e7eb"/><rect width="{w}" height="8" fill="#d16f55"/>"##,
        w = CARD_WIDTH,
        h = CARD_HEIGHT,
    ));
    out.push_str(
        r##"<text x="28" y="42" font-size="20" font-weight="700" fill="#d16f55">Student ID Card</text>"##,
    );
    out.push_str(&field("Student ID", &registration.student_id, 72));
    out.push_str(&field("Full Name", &registration.student_name, 118));
    out.push_str(&field("Meeting ID", meeting_id, 164));
    out.push_str(&field("Meeting Password", password, 210));
    out.push_str(&format!(
        r##"<g transform="translate({x},{y})">{qr}</g>"##,
        x = CARD_WIDTH - QR_SIZE - 28,
        y = (CARD_HEIGHT - QR_SIZE) / 2,
        qr = qr,
    ));
    out.push_str("</svg>");
    Ok(out)
}

pub fn download_student_card(registration: &RegistrationResponse) -> Result<(), String> {
    let svg = student_card_svg(registration)?;
    trigger_download(&card_filename(&registration.student_id), SVG_MIME, &svg)
}

#[component]
pub fn StudentCard(registration: RegistrationResponse) -> impl IntoView {
    let download_error = create_rw_signal(None::<ApiError>);
    let markup = student_card_svg(&registration).unwrap_or_else(|err| {
        log::error!("Student card render failed: {}", err);
        String::new()
    });
    let on_download = move |_| match download_student_card(&registration) {
        Ok(()) => download_error.set(None),
        Err(err) => {
            log::error!("Download failed: {}", err);
            download_error.set(Some(ApiError::unknown(format!("Download failed: {}", err))));
        }
    };

    view! {
        <div class="bg-white rounded-3xl shadow-2xl max-w-md w-full mx-auto p-8 border border-gray-100">
            <div class="text-center mb-6">
                <h2 class="text-3xl font-bold mb-2 text-gray-800 tracking-tight">"Successfully Registered"</h2>
                <p class="text-sm text-gray-500">"Keep your Student ID safe. You need it for every attendance submission."</p>
            </div>
            <div class="flex justify-center mb-6" inner_html=markup></div>
            <button
                type="button"
                class="w-full bg-orange-600 text-white py-4 rounded-2xl hover:bg-orange-700 font-semibold"
                on:click=on_download
            >
                "Download Your Student ID"
            </button>
            <InlineErrorMessage error=download_error.into() />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MeetingCredentials;

    fn registration(meeting: Option<MeetingCredentials>) -> RegistrationResponse {
        RegistrationResponse {
            student_id: "WDF1004".into(),
            student_name: "Aung & Kyaw".into(),
            meeting,
        }
    }

    #[test]
    fn card_contains_fields_and_qr() {
        let svg = student_card_svg(&registration(Some(MeetingCredentials {
            meeting_id: "81234567".into(),
            password: "secret1".into(),
        })))
        .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("WDF1004"));
        assert!(svg.contains("81234567"));
        assert!(svg.contains("secret1"));
        assert!(!svg.contains("<?xml"));
        assert_eq!(svg.matches("<svg").count(), 2);
    }

    #[test]
    fn card_escapes_text() {
        let svg = student_card_svg(&registration(None)).unwrap();
        assert!(svg.contains("Aung &amp; Kyaw"));
    }

    #[test]
    fn missing_credentials_read_not_set() {
        let svg = student_card_svg(&registration(None)).unwrap();
        assert_eq!(svg.matches(NOT_SET).count(), 2);
    }
}
