// tests/api_tests.rs

use serde_json::{Value, json};
use ternak_backend::{config::Config, evaluation::DuplicatePolicy, routes, state::AppState};

fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        rust_log: "error".to_string(),
        port: 0,
        log_dir: "logs".to_string(),
        evaluation_role: "peternak".to_string(),
        duplicate_policy: DuplicatePolicy::KeepFirst,
    }
}

/// Spawns the app backed by the in-memory store on a random port.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let app = routes::create_router(AppState::in_memory(test_config()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

async fn create_member(
    client: &reqwest::Client,
    address: &str,
    nama: &str,
    role: &str,
    kelompok: Option<&str>,
) -> i64 {
    let resp = client
        .post(format!("{}/api/members", address))
        .json(&json!({
            "nama": nama,
            "username": nama.to_lowercase(),
            "role": role,
            "kelompok": kelompok,
        }))
        .send()
        .await
        .expect("Failed to create member");
    assert_eq!(resp.status().as_u16(), 201);
    resp.json::<Value>().await.unwrap()["id"].as_i64().unwrap()
}

fn likert(values: &[i64]) -> Value {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| json!({"questionId": format!("q{}", i + 1), "answer": v}))
        .collect()
}

async fn submit(
    client: &reqwest::Client,
    address: &str,
    user_id: i64,
    answers: Value,
) -> reqwest::Response {
    client
        .post(format!("{}/api/responses", address))
        .json(&json!({
            "userId": user_id,
            "bulan": 3,
            "tahun": 2024,
            "answers": answers,
        }))
        .send()
        .await
        .expect("Failed to submit response")
}

#[tokio::test]
async fn unknown_path_404() {
    let address = spawn_app().await;
    let response = reqwest::get(format!("{}/random_path_that_does_not_exist", address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn member_validation_and_conflict() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let short = client
        .post(format!("{}/api/members", address))
        .json(&json!({"nama": "Yo", "username": "yo", "role": "peternak"}))
        .send()
        .await
        .unwrap();
    assert_eq!(short.status().as_u16(), 400);

    create_member(&client, &address, "Sutrisno", "peternak", Some("Makmur")).await;
    let dup = client
        .post(format!("{}/api/members", address))
        .json(&json!({"nama": "Lain", "username": "sutrisno", "role": "peternak"}))
        .send()
        .await
        .unwrap();
    assert_eq!(dup.status().as_u16(), 409);
}

#[tokio::test]
async fn submission_rejects_unknown_member_and_bad_period() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let missing = submit(&client, &address, 4242, json!([{"questionId": "q1", "answer": "SS"}])).await;
    assert_eq!(missing.status().as_u16(), 404);

    let id = create_member(&client, &address, "Wahyuni", "peternak", None).await;
    let bad_month = client
        .post(format!("{}/api/responses", address))
        .json(&json!({
            "userId": id,
            "bulan": 13,
            "tahun": 2024,
            "answers": [{"questionId": "q1", "answer": 4}],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_month.status().as_u16(), 400);

    let empty = submit(&client, &address, id, json!([])).await;
    assert_eq!(empty.status().as_u16(), 400);
}

#[tokio::test]
async fn submission_reports_score() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = create_member(&client, &address, "Slamet", "peternak", Some("Maju")).await;

    let resp = submit(
        &client,
        &address,
        id,
        json!([
            {"questionId": "q1", "answer": "SS"},
            {"questionId": "q2", "answer": "Setuju"},
            {"questionId": "q3", "answer": "ragu-ragu"},
        ]),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["score"], 88);
    assert_eq!(body["answeredCount"], 2);
    assert_eq!(body["totalQuestions"], 3);
}

#[tokio::test]
async fn malformed_answer_is_stored_and_skipped() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = create_member(&client, &address, "Parmi", "peternak", Some("Rukun")).await;

    let resp = submit(
        &client,
        &address,
        id,
        json!([
            {"questionId": "q1", "answer": "SS"},
            {"questionId": "q2", "answer": "S"},
            {"questionId": "q3", "answer": true},
            {"questionId": "q4", "answer": {"v": 5}},
        ]),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["score"], 88);
    assert_eq!(body["answeredCount"], 2);
    assert_eq!(body["totalQuestions"], 4);

    let stored: Vec<Value> = client
        .get(format!("{}/api/responses", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored[0]["answers"][2]["answer"], true);
    assert_eq!(stored[0]["answers"][3]["answer"]["v"], 5);

    let groups: Vec<Value> = client
        .get(format!("{}/api/evaluation/groups?policy=keep_latest", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(groups[0]["groupKey"], "Rukun");
    assert_eq!(groups[0]["members"][0]["score"], 88);
    assert_eq!(groups[0]["members"][0]["answeredCount"], 2);
}

#[tokio::test]
async fn group_evaluation_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let ani = create_member(&client, &address, "Ani", "peternak", Some("Sido Makmur")).await;
    let bayu = create_member(&client, &address, "Bayu", "peternak", Some("Sido Makmur")).await;
    let cahya = create_member(&client, &address, "Cahya", "peternak", Some("Sido Makmur")).await;
    let dewi = create_member(&client, &address, "Dewi", "peternak", None).await;
    // Extension officers are not part of the evaluated population.
    create_member(&client, &address, "Eko", "penyuluh", Some("Sido Makmur")).await;

    // Bayu 80, Ani 60, Cahya does not answer.
    let resp = submit(&client, &address, bayu, likert(&[5, 5, 5, 5, 1])).await;
    assert_eq!(resp.status().as_u16(), 201);
    let resp = submit(&client, &address, ani, likert(&[4, 4, 4, 3, 2])).await;
    assert_eq!(resp.status().as_u16(), 201);

    let groups: Vec<Value> = client
        .get(format!("{}/api/evaluation/groups?bulan=3&tahun=2024", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(groups.len(), 2);

    let makmur = &groups[0];
    assert_eq!(makmur["groupKey"], "Sido Makmur");
    assert_eq!(makmur["memberCount"], 3);
    assert_eq!(makmur["respondentCount"], 2);
    assert_eq!(makmur["averageScore"], 70);
    assert_eq!(makmur["completionPercent"], 67);
    assert_eq!(makmur["status"], "Partially responded");
    let order: Vec<i64> = makmur["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["userId"].as_i64().unwrap())
        .collect();
    assert_eq!(order, vec![bayu, ani, cahya]);

    let ungrouped = &groups[1];
    assert_eq!(ungrouped["groupKey"], "Ungrouped");
    assert_eq!(ungrouped["members"][0]["userId"], dewi);
    assert_eq!(ungrouped["status"], "No respondents");

    // A different period sees no responses at all.
    let april: Vec<Value> = client
        .get(format!("{}/api/evaluation/groups?bulan=4&tahun=2024", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(april.iter().all(|g| g["respondentCount"] == 0));
}

#[tokio::test]
async fn resubmission_follows_requested_policy() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = create_member(&client, &address, "Joko", "peternak", Some("Tani Jaya")).await;

    submit(&client, &address, id, json!([{"questionId": "q1", "answer": "STS"}])).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    submit(&client, &address, id, json!([{"questionId": "q1", "answer": "SS"}])).await;

    let score_for = |policy: &'static str| {
        let client = client.clone();
        let address = address.clone();
        async move {
            let groups: Vec<Value> = client
                .get(format!("{}/api/evaluation/groups?policy={}", address, policy))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            groups[0]["members"][0]["score"].as_i64().unwrap()
        }
    };

    assert_eq!(score_for("first").await, 0);
    assert_eq!(score_for("latest").await, 100);
}

#[tokio::test]
async fn questionnaire_lifecycle() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{}/api/questionnaires", address))
        .json(&json!({
            "judul": "Evaluasi Kandang",
            "questions": [
                {"id": "q1", "text": "Kandang dibersihkan setiap hari"},
                {"id": "q2", "text": "Vaksinasi tercatat lengkap"}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status().as_u16(), 201);
    let kuesioner_id = created.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let fetched = client
        .get(format!("{}/api/questionnaires/{}", address, kuesioner_id))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status().as_u16(), 200);
    assert_eq!(fetched.json::<Value>().await.unwrap()["questions"][1]["id"], "q2");

    let missing = client
        .get(format!("{}/api/questionnaires/999", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    let id = create_member(&client, &address, "Rina", "peternak", Some("Lestari")).await;
    let resp = client
        .post(format!("{}/api/responses", address))
        .json(&json!({
            "userId": id,
            "kuesionerId": 999,
            "bulan": 1,
            "tahun": 2024,
            "answers": [{"questionId": "q1", "answer": "S"}],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = client
        .post(format!("{}/api/responses", address))
        .json(&json!({
            "userId": id,
            "kuesionerId": kuesioner_id,
            "bulan": 1,
            "tahun": 2024,
            "answers": [{"questionId": "q1", "answer": "S"}, {"questionId": "q2", "answer": "N"}],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);

    let listed: Vec<Value> = client
        .get(format!("{}/api/responses?kuesioner_id={}", address, kuesioner_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["kelompok"], "Lestari");
}
