//! Client for the hosted form-processing endpoint.
//!
//! The backend is an external collaborator: an HTTP endpoint accepting a
//! URL-encoded POST with a `formType` discriminator plus type-specific
//! fields. The page submits in `no-cors` mode, so the response body is
//! never readable: request completion, not response content, is the
//! success signal. Errors are surfaced as retryable; there is no automatic
//! retry.

use url::Url;

use crate::error::{Error, Result};

/// A form submission, discriminated by `formType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    /// Quote request from the contact form.
    Quote {
        /// Customer name.
        name: String,
        /// Contact phone number.
        phone: String,
        /// Free-form message.
        message: String,
    },
    /// Testimonial submitted for moderation.
    Review {
        /// Reviewer name.
        name: String,
        /// Reviewer email.
        email: String,
        /// Star rating, 0 when none was selected.
        rating: u8,
        /// Review text.
        comment: String,
    },
    /// Newsletter/account signup from the register modal.
    Register {
        /// First name.
        first_name: String,
        /// Last name.
        last_name: String,
        /// Date of birth.
        birth_date: String,
        /// Contact phone number.
        phone: String,
        /// Contact email.
        email: String,
    },
}

impl FormSubmission {
    /// Returns the `formType` discriminator value.
    #[must_use]
    pub const fn form_type(&self) -> &'static str {
        match self {
            Self::Quote { .. } => "quote",
            Self::Review { .. } => "review",
            Self::Register { .. } => "register",
        }
    }

    /// Returns the URL-encoded field pairs, `formType` first.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("formType", self.form_type().to_string())];
        match self {
            Self::Quote {
                name,
                phone,
                message,
            } => {
                fields.push(("cName", name.clone()));
                fields.push(("cPhone", phone.clone()));
                fields.push(("cMsg", message.clone()));
            }
            Self::Review {
                name,
                email,
                rating,
                comment,
            } => {
                fields.push(("rName", name.clone()));
                fields.push(("rEmailReview", email.clone()));
                fields.push(("rRating", rating.to_string()));
                fields.push(("rComment", comment.clone()));
            }
            Self::Register {
                first_name,
                last_name,
                birth_date,
                phone,
                email,
            } => {
                fields.push(("rFName", first_name.clone()));
                fields.push(("rLName", last_name.clone()));
                fields.push(("rDOB", birth_date.clone()));
                fields.push(("rPhone", phone.clone()));
                fields.push(("rEmail", email.clone()));
            }
        }
        fields
    }

    /// Confirmation message the page displays once the request completes.
    #[must_use]
    pub const fn confirmation_message(&self) -> &'static str {
        match self {
            Self::Quote { .. } => "Quote sent! We will be in touch as soon as possible.",
            Self::Review { .. } => "Review submitted for moderation. Thank you!",
            Self::Register { .. } => "Signed up successfully! News is on its way.",
        }
    }
}

/// Fire-and-forget client for the forms endpoint.
#[derive(Debug, Clone)]
pub struct FormsClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl FormsClient {
    /// Creates a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute `https` URL. The
    /// page must never post credentialless form data over plaintext.
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Creates a client reusing an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute `https` URL.
    pub fn with_client(client: reqwest::Client, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("forms endpoint {endpoint:?}: {e}")))?;
        if endpoint.scheme() != "https" {
            return Err(Error::Config(format!(
                "forms endpoint must be https, got {}",
                endpoint.scheme()
            )));
        }
        Ok(Self { client, endpoint })
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submits a form. The endpoint is an opaque sink: completion of the
    /// request is the only success signal, the response is discarded.
    ///
    /// # Errors
    ///
    /// Returns a transport error; the caller should surface it as a
    /// retryable status message.
    pub async fn submit(&self, submission: &FormSubmission) -> Result<()> {
        self.client
            .post(self.endpoint.clone())
            .form(&submission.fields())
            .send()
            .await?;
        log::info!("{} form submitted", submission.form_type());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> FormSubmission {
        FormSubmission::Quote {
            name: "Ana".to_string(),
            phone: "+55 11 99999-0000".to_string(),
            message: "Need a quote".to_string(),
        }
    }

    #[test]
    fn form_type_discriminators() {
        assert_eq!(quote().form_type(), "quote");
        let review = FormSubmission::Review {
            name: String::new(),
            email: String::new(),
            rating: 5,
            comment: String::new(),
        };
        assert_eq!(review.form_type(), "review");
        let register = FormSubmission::Register {
            first_name: String::new(),
            last_name: String::new(),
            birth_date: String::new(),
            phone: String::new(),
            email: String::new(),
        };
        assert_eq!(register.form_type(), "register");
    }

    #[test]
    fn fields_start_with_form_type() {
        let fields = quote().fields();
        assert_eq!(fields[0], ("formType", "quote".to_string()));
        assert_eq!(fields[1].0, "cName");
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn review_fields_carry_rating_as_string() {
        let review = FormSubmission::Review {
            name: "Bia".to_string(),
            email: "bia@example.com".to_string(),
            rating: 0,
            comment: "ok".to_string(),
        };
        let fields = review.fields();
        assert!(fields.contains(&("rRating", "0".to_string())));
    }

    #[test]
    fn register_fields_complete() {
        let register = FormSubmission::Register {
            first_name: "Caio".to_string(),
            last_name: "Silva".to_string(),
            birth_date: "1990-01-01".to_string(),
            phone: "123".to_string(),
            email: "caio@example.com".to_string(),
        };
        let keys: Vec<_> = register.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["formType", "rFName", "rLName", "rDOB", "rPhone", "rEmail"]
        );
    }

    #[test]
    fn client_rejects_plain_http_endpoint() {
        assert!(FormsClient::new("http://script.google.com/macros/s/x/exec").is_err());
    }

    #[test]
    fn client_rejects_relative_endpoint() {
        assert!(FormsClient::new("/macros/s/x/exec").is_err());
    }

    #[test]
    fn client_accepts_https_endpoint() {
        let client = FormsClient::new("https://script.google.com/macros/s/x/exec").unwrap();
        assert_eq!(client.endpoint().scheme(), "https");
    }

    #[test]
    fn confirmation_messages_differ_by_type() {
        assert_ne!(
            quote().confirmation_message(),
            FormSubmission::Register {
                first_name: String::new(),
                last_name: String::new(),
                birth_date: String::new(),
                phone: String::new(),
                email: String::new(),
            }
            .confirmation_message()
        );
    }
}
