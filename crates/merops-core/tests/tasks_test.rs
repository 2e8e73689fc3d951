#![allow(clippy::unwrap_used)]
// End-to-end task-runner tests against a wiremock dashboard.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use merops_api::DashboardClient;
use merops_core::tasks::hub_swap::{self, HubSwapConfig};
use merops_core::tasks::tag_sync::{self, TagSyncConfig};
use merops_core::tasks::usage_scan::{self, UsageScanConfig};
use merops_core::{Gateway, TaskContext};

const ORG: &str = "org123";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, TaskContext) {
    let server = MockServer::start().await;
    let client = DashboardClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    let ctx = TaskContext::new(client)
        .with_gateway(Gateway::new(5).with_base_delay(Duration::from_millis(10)))
        .with_concurrency(4);
    (server, ctx)
}

async fn mount_bandwidth(server: &MockServer, net_id: &str, wan1_up_kbps: u64) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/networks/{net_id}/appliance/trafficShaping/uplinkBandwidth"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bandwidthLimits": {
                "wan1": { "limitUp": wan1_up_kbps, "limitDown": wan1_up_kbps }
            }
        })))
        .mount(server)
        .await;
}

// ── Usage scan ──────────────────────────────────────────────────────

#[tokio::test]
async fn usage_scan_flags_and_rescans_breaching_network() {
    let (server, ctx) = setup().await;

    // N_1 sends 20 MB in 300s (~533 kbit/s) against a 1000 Kbps limit:
    // over the 0.5 coarse threshold. N_2 stays quiet. The cellular
    // uplink is ignored entirely.
    Mock::given(method("GET"))
        .and(path(format!(
            "/organizations/{ORG}/appliance/uplinks/usage/byNetwork"
        )))
        .and(query_param("timespan", "300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "networkId": "N_1",
                "name": "Branch One",
                "byUplink": [
                    { "interface": "wan1", "sent": 20_000_000, "received": 1 },
                    { "interface": "cellular", "sent": 999_999_999, "received": 1 }
                ]
            },
            {
                "networkId": "N_2",
                "name": "Branch Two",
                "byUplink": [
                    { "interface": "wan1", "sent": 1_000, "received": 1 }
                ]
            }
        ])))
        .mount(&server)
        .await;

    mount_bandwidth(&server, "N_1", 1000).await;
    mount_bandwidth(&server, "N_2", 1000).await;

    // Each of the five 60s windows returns one interval at 6 MB sent
    // (800 kbit/s), over the 0.7 fine threshold of 700 kbit/s.
    Mock::given(method("GET"))
        .and(path("/networks/N_1/appliance/uplinks/usageHistory"))
        .and(query_param("timespan", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "startTime": "2024-06-15T10:30:00Z",
                "endTime": "2024-06-15T10:31:00Z",
                "byInterface": [
                    { "interface": "wan1", "sent": 6_000_000, "received": 1 }
                ]
            }
        ])))
        .expect(5)
        .mount(&server)
        .await;

    let report = usage_scan::run(&ctx, ORG, &UsageScanConfig::default())
        .await
        .unwrap();

    assert_eq!(report.networks_scanned, 2);
    assert_eq!(report.coarse_alerts.len(), 1);
    assert_eq!(report.coarse_alerts[0].network_id, "N_1");
    assert_eq!(report.coarse_alerts[0].interface, "wan1");
    assert_eq!(report.fine_alerts.len(), 5, "one alert per 60s window");
    assert!(report.skipped.is_empty(), "skips: {:?}", report.skipped);
}

#[tokio::test]
async fn usage_scan_reports_gaps_and_failed_fetches_without_aborting() {
    let (server, ctx) = setup().await;

    // N_1 has a wan2 uplink with no configured limit (gap); N_2's
    // bandwidth endpoint fails outright (skip), but the run completes.
    Mock::given(method("GET"))
        .and(path(format!(
            "/organizations/{ORG}/appliance/uplinks/usage/byNetwork"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "networkId": "N_1",
                "name": "Branch One",
                "byUplink": [
                    { "interface": "wan1", "sent": 100, "received": 1 },
                    { "interface": "wan2", "sent": 100, "received": 1 }
                ]
            },
            {
                "networkId": "N_2",
                "name": "Branch Two",
                "byUplink": [
                    { "interface": "wan1", "sent": 100, "received": 1 }
                ]
            }
        ])))
        .mount(&server)
        .await;

    mount_bandwidth(&server, "N_1", 1000).await;
    Mock::given(method("GET"))
        .and(path(
            "/networks/N_2/appliance/trafficShaping/uplinkBandwidth",
        ))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "errors": ["server error"] })),
        )
        .mount(&server)
        .await;

    let report = usage_scan::run(&ctx, ORG, &UsageScanConfig::default())
        .await
        .unwrap();

    assert!(report.coarse_alerts.is_empty());
    assert_eq!(report.skipped.len(), 2, "skips: {:?}", report.skipped);
    let reasons: Vec<&str> = report.skipped.iter().map(|s| s.reason.as_str()).collect();
    assert!(reasons.iter().any(|r| r.contains("wan2")), "gap reported");
    assert!(
        reasons.iter().any(|r| r.contains("uplink_bandwidth")),
        "failed fetch reported"
    );
}

#[tokio::test]
async fn usage_scan_aborts_on_auth_rejection() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/organizations/{ORG}/appliance/uplinks/usage/byNetwork"
        )))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "errors": ["Invalid API key"] })),
        )
        .mount(&server)
        .await;

    let err = usage_scan::run(&ctx, ORG, &UsageScanConfig::default())
        .await
        .unwrap_err();
    assert!(err.is_auth(), "expected auth failure, got: {err:?}");
}

// ── Tag sync ────────────────────────────────────────────────────────

#[tokio::test]
async fn tag_sync_replaces_stale_hub_tag_with_primary_hub_name() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/organizations/{ORG}/networks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "N_spoke",
                "name": "Branch One",
                "productTypes": ["appliance"],
                "tags": ["branch", "HUB_Stale_Name"]
            },
            {
                "id": "N_hub",
                "name": "Core East",
                "productTypes": ["appliance"],
                "tags": []
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/networks/N_spoke/appliance/vpn/siteToSiteVpn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mode": "spoke",
            "hubs": [{ "hubId": "N_hub", "useDefaultRoute": true }],
            "subnets": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/networks/N_hub/appliance/vpn/siteToSiteVpn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mode": "hub", "hubs": [], "subnets": []
        })))
        .mount(&server)
        .await;

    // The spoke's stale tag is replaced by the hub's name, spaces
    // flattened. The hub network needs no write.
    Mock::given(method("PUT"))
        .and(path("/networks/N_spoke"))
        .and(body_json(json!({ "tags": ["branch", "HUB_Core_East"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "N_spoke",
            "name": "Branch One",
            "productTypes": ["appliance"],
            "tags": ["branch", "HUB_Core_East"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = tag_sync::run(&ctx, ORG, &TagSyncConfig::default())
        .await
        .unwrap();

    assert_eq!(report.updated.len(), 1);
    assert_eq!(report.updated[0].network_id, "N_spoke");
    assert_eq!(report.updated[0].tags, vec!["branch", "HUB_Core_East"]);
    assert_eq!(report.unchanged, 1, "hub network already reconciled");
    assert!(report.skipped.is_empty());
}

#[tokio::test]
async fn tag_sync_dry_run_writes_nothing() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/organizations/{ORG}/networks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "N_spoke",
                "name": "Branch One",
                "productTypes": ["appliance"],
                "tags": []
            },
            {
                "id": "N_hub",
                "name": "Core",
                "productTypes": ["appliance"],
                "tags": []
            }
        ])))
        .mount(&server)
        .await;

    for (id, body) in [
        (
            "N_spoke",
            json!({ "mode": "spoke", "hubs": [{ "hubId": "N_hub" }], "subnets": [] }),
        ),
        ("N_hub", json!({ "mode": "hub", "hubs": [], "subnets": [] })),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/networks/{id}/appliance/vpn/siteToSiteVpn")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
    }

    // No PUT mock mounted: a write attempt would 404 and show up as a
    // skip. Dry run must not attempt one.
    let config = TagSyncConfig {
        dry_run: true,
        ..TagSyncConfig::default()
    };
    let report = tag_sync::run(&ctx, ORG, &config).await.unwrap();

    assert!(report.dry_run);
    assert_eq!(report.updated.len(), 1);
    assert_eq!(report.updated[0].tags, vec!["HUB_Core"]);
    assert!(report.skipped.is_empty());
}

#[tokio::test]
async fn tag_sync_retries_rate_limited_listing() {
    let (server, ctx) = setup().await;

    // First attempt is rate limited; the gateway retries and succeeds.
    Mock::given(method("GET"))
        .and(path(format!("/organizations/{ORG}/networks")))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/organizations/{ORG}/networks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let report = tag_sync::run(&ctx, ORG, &TagSyncConfig::default())
        .await
        .unwrap();
    assert_eq!(report.updated.len(), 0);
    assert_eq!(report.unchanged, 0);
}

// ── Hub swap ────────────────────────────────────────────────────────

#[tokio::test]
async fn hub_swap_reorders_spokes_and_counts_inapplicable() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/organizations/{ORG}/networks")))
        .and(query_param("tags[]", "HUB_Core"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "N_s1", "name": "Spoke One", "productTypes": ["appliance"], "tags": ["HUB_Core"] },
            { "id": "N_s2", "name": "Lone Spoke", "productTypes": ["appliance"], "tags": ["HUB_Core"] }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/networks/N_s1/appliance/vpn/siteToSiteVpn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mode": "spoke",
            "hubs": [
                { "hubId": "N_a", "useDefaultRoute": true },
                { "hubId": "N_b", "useDefaultRoute": false }
            ],
            "subnets": [{ "localSubnet": "10.1.0.0/24", "useVpn": true }]
        })))
        .mount(&server)
        .await;
    // A spoke with a single hub: nothing to swap.
    Mock::given(method("GET"))
        .and(path("/networks/N_s2/appliance/vpn/siteToSiteVpn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mode": "spoke",
            "hubs": [{ "hubId": "N_a", "useDefaultRoute": true }],
            "subnets": []
        })))
        .mount(&server)
        .await;

    // The write-back carries the swapped order and untouched subnets.
    Mock::given(method("PUT"))
        .and(path("/networks/N_s1/appliance/vpn/siteToSiteVpn"))
        .and(body_json(json!({
            "mode": "spoke",
            "hubs": [
                { "hubId": "N_b", "useDefaultRoute": false },
                { "hubId": "N_a", "useDefaultRoute": true }
            ],
            "subnets": [{ "localSubnet": "10.1.0.0/24", "useVpn": true }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mode": "spoke", "hubs": [], "subnets": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = HubSwapConfig {
        tag: "HUB_Core".to_owned(),
        dry_run: false,
    };
    let report = hub_swap::run(&ctx, ORG, &config).await.unwrap();

    assert_eq!(report.swapped.len(), 1);
    assert_eq!(report.swapped[0].network_id, "N_s1");
    assert_eq!(report.swapped[0].new_primary, "N_b");
    assert_eq!(report.swapped[0].new_secondary, "N_a");
    assert_eq!(report.not_applicable, 1);
    assert!(report.skipped.is_empty());
}

#[tokio::test]
async fn hub_swap_skips_failed_fetch_without_cancelling_siblings() {
    let (server, ctx) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/organizations/{ORG}/networks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "N_s1", "name": "Spoke One", "productTypes": ["appliance"], "tags": ["T"] },
            { "id": "N_s2", "name": "Spoke Two", "productTypes": ["appliance"], "tags": ["T"] }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/networks/N_s1/appliance/vpn/siteToSiteVpn"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "errors": ["Not found"] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/networks/N_s2/appliance/vpn/siteToSiteVpn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mode": "spoke",
            "hubs": [{ "hubId": "N_a" }, { "hubId": "N_b" }],
            "subnets": []
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/networks/N_s2/appliance/vpn/siteToSiteVpn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mode": "spoke", "hubs": [], "subnets": []
        })))
        .mount(&server)
        .await;

    let config = HubSwapConfig {
        tag: "T".to_owned(),
        dry_run: false,
    };
    let report = hub_swap::run(&ctx, ORG, &config).await.unwrap();

    assert_eq!(report.swapped.len(), 1);
    assert_eq!(report.swapped[0].network_id, "N_s2");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].network_id, "N_s1");
}
