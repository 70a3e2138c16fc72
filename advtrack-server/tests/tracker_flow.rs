//! End-to-end flows over a real socket

mod common;

use advtrack_core::{AdvancementStore, NewAdvancement};
use advtrack_server::http::DashboardView;
use common::{advancement, client, spawn_server};
use reqwest::StatusCode;

fn nether_rows() -> Vec<NewAdvancement> {
    vec![
        advancement(1, "Minecraft", 1, None),
        advancement(2, "We Need to Go Deeper", 1, Some(1)),
        NewAdvancement {
            description: "Enter the Nether".into(),
            ..advancement(3, "Nether", 2, Some(2))
        },
        advancement(4, "Hot Tourist Destinations", 2, Some(3)),
        NewAdvancement {
            rewards: Some("Nether Star".into()),
            ..advancement(5, "Withering Heights", 2, Some(3))
        },
        advancement(6, "Husbandry", 5, None),
    ]
}

#[tokio::test]
async fn toggling_parent_unlocks_child() {
    let server = spawn_server(&nether_rows()).await;
    let http = client();

    let view: DashboardView = http
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!view.advancements[1].is_available);

    let response = http.post(server.url("/toggle/1")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let view: DashboardView = http
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(view.advancements[0].is_completed);
    assert!(view.advancements[1].is_available);
    assert!(!view.advancements[2].is_available);
}

#[tokio::test]
async fn quarter_of_minecraft_tab() {
    let rows: Vec<_> = (1..=16)
        .map(|id| NewAdvancement {
            completed: id <= 4,
            ..advancement(id, &format!("Minecraft {id}"), 1, None)
        })
        .collect();
    let server = spawn_server(&rows).await;

    let view: DashboardView = client()
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view.tabs[0].completion_percentage, 25.0);
    assert_eq!(view.worlds[0].completion_percentage, 4.0 / 110.0 * 100.0);
}

#[tokio::test]
async fn search_for_nether_in_id_order() {
    let server = spawn_server(&nether_rows()).await;

    let view: DashboardView = client()
        .post(server.url("/"))
        .form(&[("search", "Nether")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let ids: Vec<_> = view.advancements.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![3, 5]);
    assert_eq!(view.search_query, "Nether");
}

#[tokio::test]
async fn world_lifecycle() {
    let server = spawn_server(&[]).await;
    let http = client();

    let response = http
        .post(server.url("/addWorld"))
        .form(&[("WorldBox", "Hardcore")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let worlds = server.store.list_worlds().await.unwrap();
    assert_eq!(worlds.len(), 2);
    let id = worlds[1].id.to_string();

    let response = http
        .post(server.url("/deleteWorld"))
        .form(&[("WorldDropdown", id.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(server.store.list_worlds().await.unwrap().len(), 1);
}

#[tokio::test]
async fn signup_round_trip() {
    let server = spawn_server(&[]).await;
    let http = client();

    let form = [
        ("inputName", "Steve"),
        ("inputEmail", "steve@example.com"),
        ("inputPassword", "creeper"),
    ];
    let response = http
        .post(server.url("/api/signup"))
        .form(&form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User created successfully !");

    let response = http
        .post(server.url("/api/signup"))
        .form(&[("inputName", "Steve")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Enter the required fields");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_page_loads_and_toggles_succeed() {
    let server = spawn_server(&nether_rows()).await;
    let http = client();

    let mut tasks = tokio::task::JoinSet::new();
    for id in 1..=6 {
        let page = http.get(server.url("/"));
        tasks.spawn(async move { page.send().await.unwrap().status() });
        let toggle = http.post(server.url(&format!("/toggle/{id}")));
        tasks.spawn(async move { toggle.send().await.unwrap().status() });
    }

    while let Some(status) = tasks.join_next().await {
        let status = status.unwrap();
        assert!(
            status == StatusCode::OK || status == StatusCode::SEE_OTHER,
            "got {status}"
        );
    }

    let rows = server.store.list_advancements().await.unwrap();
    assert!(rows.iter().all(|a| a.is_completed));
}
