use crate::models::Doctor;

#[allow(clippy::too_many_arguments)]
fn doctor(
    id: u32,
    name: &str,
    specialty: &str,
    experience: &str,
    avatar: &str,
    photo: Option<&str>,
    available: bool,
    times: &str,
) -> Doctor {
    Doctor {
        id,
        name: name.to_string(),
        specialty: specialty.to_string(),
        experience: experience.to_string(),
        phone: format!("+1-800-555-{:04}", 100 + id),
        avatar: avatar.to_string(),
        photo: photo.map(str::to_string),
        available,
        times: times.to_string(),
    }
}

/// The clinic's built-in roster, in display order.
pub fn default_doctors() -> Vec<Doctor> {
    vec![
        doctor(1, "Dr. Sarah Johnson", "General Practice", "8 years", "👨‍⚕️",
            Some("assets/Confident Young Doctor.png"), true, "9:00 AM - 5:00 PM"),
        doctor(2, "Dr. Michael Chen", "Cardiology", "12 years", "👨‍⚕️",
            Some("assets/Healthcare Professional Portrait (1).png"), false, "10:00 AM - 6:00 PM"),
        doctor(3, "Dr. Emily Watson", "Dermatology", "6 years", "👩‍⚕️",
            Some("assets/Healthcare Professional Portrait.png"), true, "8:00 AM - 4:00 PM"),
        doctor(4, "Dr. James Rodriguez", "Orthopedics", "10 years", "👨‍⚕️",
            Some("assets/Medical Professional Portrait (1).png"), true, "9:30 AM - 5:30 PM"),
        doctor(5, "Dr. Lisa Anderson", "Pediatrics", "9 years", "👩‍⚕️",
            Some("assets/Medical Professional Portrait.png"), false, "9:00 AM - 4:30 PM"),
        doctor(6, "Dr. Robert Thompson", "General Practice", "15 years", "👨‍⚕️",
            Some("assets/Professional Portrait.png"), true, "8:30 AM - 5:00 PM"),
        doctor(7, "Dr. Patricia Martinez", "Cardiology", "11 years", "👩‍⚕️",
            None, false, "10:00 AM - 6:00 PM"),
        doctor(8, "Dr. William Lee", "Orthopedics", "7 years", "👨‍⚕️",
            None, true, "9:00 AM - 5:00 PM"),
    ]
}
