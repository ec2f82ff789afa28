//! Admissions flows over one shared store: the paths the site's forms
//! actually take.

use admitdb::{
    AccountService, CollectionStore, ContactForm, ContactService, EnrollmentForm,
    EnrollmentService, EnrollmentStatus, LoginRequest, NewUser, ServiceError,
};
use chrono::NaiveDate;
use std::sync::Arc;

struct Site {
    store: Arc<CollectionStore>,
    accounts: AccountService,
    contact: ContactService,
    enrollment: EnrollmentService,
}

fn site() -> Site {
    let store = Arc::new(CollectionStore::new());
    Site {
        accounts: AccountService::new(Arc::clone(&store)),
        contact: ContactService::new(Arc::clone(&store)),
        enrollment: EnrollmentService::new(Arc::clone(&store)),
        store,
    }
}

fn ana() -> NewUser {
    NewUser {
        first_name: "Ana".to_string(),
        last_name: "García".to_string(),
        email: "ana@example.com".to_string(),
        phone: "3015551234".to_string(),
        password: "supersecret".to_string(),
        confirm_password: "supersecret".to_string(),
        accept_terms: true,
    }
}

fn application(document_number: &str) -> EnrollmentForm {
    EnrollmentForm {
        first_name: "Ana".to_string(),
        last_name: "García".to_string(),
        document_type: "CC".to_string(),
        document_number: document_number.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
        gender: "F".to_string(),
        phone: "6015551234".to_string(),
        mobile: "3015551234".to_string(),
        email: "ana@example.com".to_string(),
        address: "Calle 12 #3-45".to_string(),
        city: "Cali".to_string(),
        department: "Valle".to_string(),
        program: "Systems Engineering".to_string(),
        referral_source: "web".to_string(),
    }
}

#[test]
fn visitor_registers_and_logs_in() {
    let site = site();

    let registered = site.accounts.register(ana()).unwrap();
    assert!(site.accounts.email_exists("ana@example.com").unwrap());

    // Second registration with the same email is refused
    let err = site.accounts.register(ana()).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // Wrong password is refused
    let err = site
        .accounts
        .login(LoginRequest {
            email: "ana@example.com".to_string(),
            password: "notthepassword".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidCredentials));

    // Right password succeeds and never exposes the stored password
    let session = site
        .accounts
        .login(LoginRequest {
            email: "ana@example.com".to_string(),
            password: "supersecret".to_string(),
        })
        .unwrap();
    assert_eq!(session.id, registered.id);
    assert!(session.field("password").is_none());
}

#[test]
fn applicant_enrolls_and_is_reviewed() {
    let site = site();

    let submitted = site.enrollment.apply(application("100200300")).unwrap();
    assert_eq!(submitted.field_str("status"), Some("pending"));

    // Duplicate document number is refused
    let err = site.enrollment.apply(application("100200300")).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // Staff looks the application up by document and approves it
    let found = site.enrollment.find_by_document("100200300").unwrap();
    assert_eq!(found.id, submitted.id);

    let approved = site
        .enrollment
        .set_status(found.id, EnrollmentStatus::Approved, Some("ok".to_string()))
        .unwrap();
    assert_eq!(approved.field_str("status"), Some("approved"));
    assert_eq!(approved.created_at, submitted.created_at);

    let summary = site.enrollment.summary().unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.approved, 1);
    assert_eq!(summary.pending, 0);
}

#[test]
fn contact_message_is_received_and_triaged() {
    let site = site();

    let message = site
        .contact
        .submit(ContactForm {
            name: "Carlos Pérez".to_string(),
            email: "carlos@example.com".to_string(),
            phone: "3015551234".to_string(),
            subject: "Admission dates".to_string(),
            message: "When does the next cohort start?".to_string(),
        })
        .unwrap();
    assert_eq!(message.field_str("status"), Some("pending"));
    assert_eq!(message.field_str("priority"), Some("normal"));

    let summary = site.contact.summary().unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.pending, 1);
}

#[test]
fn services_share_one_store() {
    let site = site();

    site.accounts.register(ana()).unwrap();
    site.enrollment.apply(application("100200300")).unwrap();

    let stats = site.store.stats();
    assert_eq!(stats.collections["users"].size, 1);
    assert_eq!(stats.collections["enrollments"].size, 1);
    assert_eq!(stats.total, 2);
}
