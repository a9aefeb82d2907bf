use crate::domain::model::{
    Client, NewClient, NewService, Service, ServiceVariant, DOCUMENT_ID_MAX, PERSON_NAME_MAX,
    PHONE_MAX, PROTOCOL_LEVEL_MAX, SERVICE_NAME_MAX, SPECIALTY_MAX, TAG_CODE_MAX, TAG_KIND_MAX,
};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_email, validate_max_length, validate_short_text, Validate,
};

fn validate_service_fields(name: &str, variant: &ServiceVariant) -> Result<()> {
    validate_short_text("name", name, SERVICE_NAME_MAX)?;
    match variant {
        ServiceVariant::Plain => Ok(()),
        ServiceVariant::Instructor(instructor) => {
            validate_short_text("specialty", &instructor.specialty, SPECIALTY_MAX)
        }
        ServiceVariant::Tag(tag) => {
            validate_short_text("kind", &tag.kind, TAG_KIND_MAX)?;
            validate_short_text("code", &tag.code, TAG_CODE_MAX)
        }
        ServiceVariant::Protocol(protocol) => {
            validate_short_text("level", &protocol.level, PROTOCOL_LEVEL_MAX)
        }
    }
}

fn validate_client_fields(
    document_id: Option<&str>,
    first_name: &str,
    last_name: &str,
    phone: &str,
    email: &str,
) -> Result<()> {
    if let Some(document_id) = document_id {
        validate_max_length("document_id", document_id, DOCUMENT_ID_MAX)?;
    }
    validate_short_text("first_name", first_name, PERSON_NAME_MAX)?;
    validate_short_text("last_name", last_name, PERSON_NAME_MAX)?;
    validate_short_text("phone", phone, PHONE_MAX)?;
    validate_email("email", email)
}

impl Validate for NewService {
    fn validate(&self) -> Result<()> {
        validate_service_fields(&self.name, &self.variant)
    }
}

impl Validate for Service {
    fn validate(&self) -> Result<()> {
        validate_service_fields(&self.name, &self.variant)
    }
}

impl Validate for NewClient {
    fn validate(&self) -> Result<()> {
        validate_client_fields(
            self.document_id.as_deref(),
            &self.first_name,
            &self.last_name,
            &self.phone,
            &self.email,
        )
    }
}

impl Validate for Client {
    fn validate(&self) -> Result<()> {
        validate_client_fields(
            self.document_id.as_deref(),
            &self.first_name,
            &self.last_name,
            &self.phone,
            &self.email,
        )
    }
}
