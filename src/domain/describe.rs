use crate::domain::model::{
    Client, ReservationDetails, Service, ServiceVariant, REGULATIONS_PREVIEW_CHARS,
};
use crate::domain::ports::Describe;

impl Service {
    /// Summary shared by every service variant.
    pub fn base_description(&self) -> String {
        format!("Service: {}", self.name)
    }
}

impl Describe for Service {
    fn describe(&self) -> String {
        let base = self.base_description();
        match &self.variant {
            ServiceVariant::Plain => base,
            ServiceVariant::Instructor(instructor) => format!(
                "{} (Specialty: {}, Experience: {} years)",
                base, instructor.specialty, instructor.years_experience
            ),
            ServiceVariant::Tag(tag) => format!("{} - Type: {}, Code: {}", base, tag.kind, tag.code),
            // The ellipsis is appended even when nothing was cut.
            ServiceVariant::Protocol(protocol) => {
                let preview: String = protocol
                    .regulations
                    .chars()
                    .take(REGULATIONS_PREVIEW_CHARS)
                    .collect();
                format!("{} - Level: {}, Regulations: {}...", base, protocol.level, preview)
            }
        }
    }
}

impl Describe for Client {
    fn describe(&self) -> String {
        format!("Client: {} {}", self.first_name, self.last_name)
    }
}

impl Describe for ReservationDetails {
    fn describe(&self) -> String {
        self.to_string()
    }
}
