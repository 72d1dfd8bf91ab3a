//! Network seam used by the registration workflow

use async_trait::async_trait;
use clubhub_client::{Client, Club, SchoolRegistration};
use serde_json::Value;

#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Option set for the club multi-select
    async fn fetch_clubs(&self) -> clubhub_client::Result<Vec<Club>>;

    async fn register_school(&self, payload: &SchoolRegistration) -> clubhub_client::Result<Value>;
}

#[async_trait]
impl RegistrationApi for Client {
    async fn fetch_clubs(&self) -> clubhub_client::Result<Vec<Club>> {
        self.clubs().all().await
    }

    async fn register_school(&self, payload: &SchoolRegistration) -> clubhub_client::Result<Value> {
        self.groups().register_school(payload).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::events::{Notification, Presenter};
    use crate::domain::value_objects::FieldErrors;
    use crate::schema::{fields, FormInput};
    use crate::{FormPhase, NavigationContext, RegistrationForm, SubmitOutcome};

    #[derive(Default)]
    struct Screen {
        toasts: Vec<Notification>,
        routes: Vec<String>,
    }

    impl Presenter for Screen {
        fn notify(&mut self, notification: Notification) {
            self.toasts.push(notification);
        }

        fn navigate(&mut self, route: &str) {
            self.routes.push(route.to_string());
        }

        fn show_field_errors(&mut self, _errors: &FieldErrors) {}
    }

    fn input() -> FormInput {
        let mut input = FormInput::new();
        input
            .set_choices(fields::CLUBS, ["Chess", "Eco Club"])
            .set_text(fields::NO_OF_STUDENTS, "120")
            .set_text(fields::TOTAL_CLASSES, "8")
            .set_text(fields::LIST_OF_CLASSES, "6A,6B,7A")
            .set_text(fields::COORDINATOR, "Mr. Iyer")
            .set_text(fields::PHONE_NUMBER, "9876543210")
            .set_text(fields::REFERRAL_NAME, "Meena");
        input
    }

    #[tokio::test]
    async fn test_register_against_http_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/club/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "clubs": [{ "id": 7, "name": "Eco Club" }, { "id": 9, "name": "Chess" }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/group/school/register"))
            .and(body_json(json!({
                "groupId": 5,
                "clubs": "7,9",
                "list_of_classes": "6A,6B,7A",
                "no_of_students": 120,
                "phoneNUmber": 9876543210i64
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "groupId": 5 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(server.uri()).unwrap();
        let mut form = RegistrationForm::new(client, NavigationContext::new(Some("5".into())));
        let mut screen = Screen::default();

        form.mount().await;
        let outcome = form.submit(&input(), &mut screen).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Succeeded));
        assert_eq!(screen.routes, vec!["/login".to_string()]);
    }

    #[tokio::test]
    async fn test_server_error_on_register_is_a_failed_submit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/club/all"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/group/school/register"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = Client::new(server.uri()).unwrap();
        let mut form = RegistrationForm::new(client, NavigationContext::default());
        let mut screen = Screen::default();

        form.mount().await;
        assert_eq!(form.phase(), FormPhase::Ready);
        assert!(form.options().is_empty());

        let outcome = form.submit(&input(), &mut screen).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.status_code() == Some(500)));
        assert_eq!(form.phase(), FormPhase::Ready);
        assert_eq!(screen.toasts, vec![Notification::submit_failed()]);
        assert!(screen.routes.is_empty());
    }
}
