use std::net::TcpListener;

use campaign_tracker::campaign::CampaignStatus;
use campaign_tracker::dashboard::{
    CampaignClient, CampaignForm, ClientError, Dashboard, Filter, HttpCampaignClient,
};
use campaign_tracker::{BudgetField, CreateCampaignBody, MemoryDatabase};

fn start_server() -> (String, actix_web::dev::ServerHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = campaign_tracker::server(listener, Box::new(MemoryDatabase::new())).unwrap();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{}", addr), handle)
}

fn spring_sale_form() -> CampaignForm {
    CampaignForm {
        name: "Spring Sale".into(),
        budget: "1500".into(),
        start_date: "2024-03-01".into(),
        end_date: "2024-03-31".into(),
        status: "active".into(),
    }
}

#[actix_web::test]
async fn dashboard_adds_and_filters_campaigns() {
    let (url, handle) = start_server();
    let mut dashboard = Dashboard::new(HttpCampaignClient::new(&url));

    dashboard.load().await.unwrap();
    assert!(dashboard.campaigns().is_empty());
    assert!(dashboard.render().contains("No campaigns found."));

    let created = dashboard.submit(spring_sale_form()).await.unwrap();
    assert_eq!(created.budget, 1500.0);
    assert_eq!(created.status, "active");
    assert_eq!(dashboard.error(), "");
    assert_eq!(dashboard.form(), &CampaignForm::default());
    assert_eq!(dashboard.campaigns(), &[created.clone()][..]);

    let visible = dashboard.apply_filter(Filter::Status(CampaignStatus::Active));
    assert_eq!(visible, vec![&created]);
    assert!(dashboard.render().contains("$1500.00"));

    let visible = dashboard.apply_filter(Filter::Status(CampaignStatus::Upcoming));
    assert!(visible.is_empty());
    assert!(dashboard.render().contains("No campaigns found."));

    handle.stop(true).await;
}

#[actix_web::test]
async fn server_validation_message_reaches_the_client() {
    let (url, handle) = start_server();
    let client = HttpCampaignClient::new(&url);

    let body = CreateCampaignBody {
        name: Some("Spring Sale".into()),
        budget: Some(BudgetField::Text("lots".into())),
        start_date: Some("2024-03-01".into()),
        end_date: Some("2024-03-31".into()),
        status: Some("active".into()),
    };
    let err = client.create_campaign(&body).await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Rejected {
            status: 400,
            message: Some("Budget must be a number.".into()),
        }
    );
    assert!(client.list_campaigns().await.unwrap().is_empty());

    handle.stop(true).await;
}

#[actix_web::test]
async fn unreachable_server_shows_generic_message() {
    // bind and drop to get a port nothing listens on
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let mut dashboard = Dashboard::new(HttpCampaignClient::new(&format!("http://{}", addr)));

    assert!(dashboard.load().await.is_err());
    assert!(dashboard.submit(spring_sale_form()).await.is_none());
    assert_eq!(dashboard.error(), "Failed to add campaign.");
    assert_eq!(dashboard.form(), &spring_sale_form());
}

#[actix_web::test]
async fn slow_server_is_waited_for() {
    use actix_web::{web, App, HttpResponse, HttpServer};
    use std::time::Duration;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(|| {
        App::new().route(
            "/api/campaigns",
            web::get().to(|| async {
                actix_web::rt::time::sleep(Duration::from_secs(6)).await;
                HttpResponse::Ok().json(Vec::<i64>::new())
            }),
        )
    })
    .workers(1)
    .listen(listener)
    .unwrap()
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let client = HttpCampaignClient::new(&format!("http://{}", addr));
    assert!(client.list_campaigns().await.unwrap().is_empty());

    handle.stop(true).await;
}
