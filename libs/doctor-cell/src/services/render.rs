use shared_utils::escape_html;

use crate::models::Doctor;

pub const EMPTY_DIRECTORY_HTML: &str =
    r#"<p class="doctors-empty">No doctors found for this specialty.</p>"#;

fn avatar_html(doctor: &Doctor, extra_class: &str, lazy: bool) -> String {
    match doctor.photo.as_deref() {
        Some(photo) if doctor.has_photo() => format!(
            r#"<img src="{}" alt="{}" class="doctor-avatar-img{}"{}>"#,
            escape_html(photo),
            escape_html(&doctor.name),
            extra_class,
            if lazy { r#" loading="lazy""# } else { "" },
        ),
        _ => format!(r#"<div class="doctor-avatar">{}</div>"#, escape_html(&doctor.avatar)),
    }
}

/// One directory card. `selected` adds the highlight class.
pub fn render_card(doctor: &Doctor, selected: bool) -> String {
    let mut classes = String::from("doctor-card");
    if selected {
        classes.push_str(" selected");
    }
    if !doctor.available {
        classes.push_str(" unavailable");
    }

    let availability = if doctor.available {
        r#"<div class="doctor-availability">Available</div>"#
    } else {
        r#"<div class="doctor-availability unavailable">Unavailable</div>"#
    };

    format!(
        r#"<div class="{classes}" data-doctor-id="{id}">
    {avatar}
    <div class="doctor-info">
        <div class="doctor-name">{name}</div>
        <div class="doctor-specialty">{specialty}</div>
        <div class="doctor-experience">Experience: {experience}</div>
        <span class="doctor-times">📅 {times}</span>
        {availability}
    </div>
</div>"#,
        classes = classes,
        id = doctor.id,
        avatar = avatar_html(doctor, "", true),
        name = escape_html(&doctor.name),
        specialty = escape_html(&doctor.specialty),
        experience = escape_html(&doctor.experience),
        times = escape_html(&doctor.times),
        availability = availability,
    )
}

/// Full directory listing, or the empty-state notice when nothing matched.
pub fn render_directory(doctors: &[Doctor], selected_doctor_id: Option<u32>) -> String {
    if doctors.is_empty() {
        return EMPTY_DIRECTORY_HTML.to_string();
    }

    doctors
        .iter()
        .map(|d| render_card(d, selected_doctor_id == Some(d.id)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detail panel for the selected doctor.
pub fn render_preview(doctor: &Doctor) -> String {
    let phone = escape_html(&doctor.phone);
    format!(
        r#"{avatar}
<div class="doctor-preview-details">
    <h4>{name}</h4>
    <p><strong>Specialty:</strong> {specialty}</p>
    <p><strong>Experience:</strong> {experience}</p>
    <p><strong>Available Times:</strong> {times}</p>
    <p><strong>Phone:</strong> <a href="tel:{phone}">{phone}</a></p>
    <p class="doctor-ready"><strong>✓ Ready to accept your appointment</strong></p>
</div>"#,
        avatar = avatar_html(doctor, " preview-avatar", false),
        name = escape_html(&doctor.name),
        specialty = escape_html(&doctor.specialty),
        experience = escape_html(&doctor.experience),
        times = escape_html(&doctor.times),
        phone = phone,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_doctors;

    #[test]
    fn test_card_uses_photo_when_present() {
        let doctors = default_doctors();
        let card = render_card(&doctors[0], false);
        assert!(card.contains(r#"<img src="assets/Confident Young Doctor.png""#));
        assert!(card.contains(r#"loading="lazy""#));
        assert!(!card.contains("selected"));
    }

    #[test]
    fn test_card_falls_back_to_avatar() {
        let doctors = default_doctors();
        let card = render_card(&doctors[7], true);
        assert!(card.contains(r#"<div class="doctor-avatar">"#));
        assert!(card.contains(r#"class="doctor-card selected""#));
    }

    #[test]
    fn test_empty_photo_uses_avatar() {
        let mut doctor = default_doctors().remove(0);
        doctor.photo = Some(String::new());
        assert!(!doctor.has_photo());

        let card = render_card(&doctor, false);
        assert!(card.contains(r#"<div class="doctor-avatar">"#));
        assert!(!card.contains("<img"));
    }

    #[test]
    fn test_unavailable_card() {
        let doctors = default_doctors();
        let card = render_card(&doctors[1], false);
        assert!(card.contains("doctor-card unavailable"));
        assert!(card.contains(">Unavailable</div>"));
    }

    #[test]
    fn test_empty_directory_notice() {
        assert_eq!(render_directory(&[], None), EMPTY_DIRECTORY_HTML);
    }

    #[test]
    fn test_directory_highlights_only_selected() {
        let doctors = default_doctors();
        let html = render_directory(&doctors, Some(3));
        assert_eq!(html.matches(" selected").count(), 1);
        assert!(html.contains(r#"data-doctor-id="3""#));
    }

    #[test]
    fn test_preview_escapes_text() {
        let mut doctor = default_doctors().remove(0);
        doctor.name = "Dr. <b>Bold</b>".to_string();
        let preview = render_preview(&doctor);
        assert!(preview.contains("<h4>Dr. &lt;b&gt;Bold&lt;/b&gt;</h4>"));
        assert!(preview.contains(r#"href="tel:+1-800-555-0101""#));
    }
}
