//! Shared fixtures: a mocked schedule API and an in-memory chat store

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use reschedule::bot::Data;
use reschedule::config::ScheduleConfig;
use reschedule::services::ScheduleClient;
use reschedule::Database;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TZ: Tz = chrono_tz::Europe::Kyiv;

pub fn groups_body() -> Value {
    json!({
        "data": [
            {"id": "g1", "name": "IP-01", "faculty": "FICT"},
            {"id": "g2", "name": "KV-11", "faculty": "FPM"}
        ]
    })
}

fn empty_day(day: &str) -> Value {
    json!({"day": day, "pairs": []})
}

/// First week: six days, classes on Monday. Second week: Monday only.
pub fn schedule_body() -> Value {
    json!({
        "data": {
            "groupCode": "IP-01",
            "scheduleFirstWeek": [
                {
                    "day": "Monday",
                    "pairs": [
                        {"name": "Physics", "type": "Lab", "time": "10.25", "place": "7-301"},
                        {"name": "Maths", "type": "Lecture", "time": "8.30", "place": "7-101"}
                    ]
                },
                empty_day("Tuesday"),
                empty_day("Wednesday"),
                empty_day("Thursday"),
                empty_day("Friday"),
                empty_day("Saturday")
            ],
            "scheduleSecondWeek": [
                {
                    "day": "Monday",
                    "pairs": [{"name": "History", "type": "Practice", "time": "12.20"}]
                }
            ]
        }
    })
}

pub fn time_body(current_week: u8, current_day: u8) -> Value {
    json!({
        "data": {"currentWeek": current_week, "currentDay": current_day, "currentLesson": 0}
    })
}

/// Mount groups, schedule and time endpoints for group `g1`
pub async fn mount_api(server: &MockServer, current_week: u8, current_day: u8) {
    Mock::given(method("GET"))
        .and(path("/schedule/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(groups_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/schedule/lessons"))
        .and(query_param("groupId", "g1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/time/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(time_body(current_week, current_day)))
        .mount(server)
        .await;
}

pub fn schedule_config(server: &MockServer) -> ScheduleConfig {
    ScheduleConfig {
        api_url: format!("{}/", server.uri()),
        ..ScheduleConfig::default()
    }
}

pub async fn data_for(server: &MockServer) -> (Data, Database) {
    let db = Database::open_in_memory().await.unwrap();
    let api = ScheduleClient::new(&schedule_config(server)).unwrap();
    let data = Data::new(api, Arc::new(db.clone()), TZ, Some("reschedule_bot".to_string()));
    (data, db)
}

/// A UTC instant that reads as `hour:minute` on Monday 14 Oct 2024 in Kyiv
pub fn kyiv(hour: u32, minute: u32) -> DateTime<Utc> {
    TZ.with_ymd_and_hms(2024, 10, 14, hour, minute, 0)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}
