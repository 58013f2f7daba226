/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Thin RPC client for the media server's room, egress, and ingress APIs.
//!
//! Every call is a Twirp-style JSON POST authenticated with a fresh,
//! short-lived service token. This module carries no business logic: it
//! forwards requests and maps transport failures to `BACKEND_ERROR`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use roomgate_types::webhook::{EgressInfo, IngressInfo, RoomInfo};

use crate::error::AppError;
use crate::state::SigningKeys;
use crate::token::issue_service_token;

/// RPC client for the media server management APIs.
#[derive(Clone)]
pub struct RoomClient {
    http: reqwest::Client,
    base_url: String,
    keys: SigningKeys,
}

/// Normalize a media server URL to its HTTP form. Deployments often
/// configure the `ws://` / `wss://` signalling URL; the management API
/// lives on the same host over HTTP.
fn http_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("wss://") {
        format!("https://{rest}")
    } else if let Some(rest) = url.strip_prefix("ws://") {
        format!("http://{rest}")
    } else {
        url.to_string()
    }
}

impl RoomClient {
    pub fn new(keys: SigningKeys, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: http_url(base_url.trim_end_matches('/')),
            keys,
        }
    }

    async fn twirp<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        service: &str,
        method: &str,
        body: &Req,
    ) -> Result<Resp, AppError> {
        let token = issue_service_token(&self.keys)?;
        let url = format!("{}/twirp/livekit.{service}/{method}", self.base_url);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::error!("{service}/{method} failed with {status}: {detail}");
            return Err(AppError::backend_error(&format!(
                "{service}/{method} returned {status}"
            )));
        }

        Ok(resp.json().await?)
    }

    // ------------------------------------------------------------------
    // RoomService
    // ------------------------------------------------------------------

    pub async fn create_room(
        &self,
        name: &str,
        metadata: Option<&str>,
    ) -> Result<RoomInfo, AppError> {
        #[derive(Serialize)]
        struct Req<'a> {
            name: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            metadata: Option<&'a str>,
        }
        self.twirp("RoomService", "CreateRoom", &Req { name, metadata })
            .await
    }

    pub async fn list_rooms(&self, names: &[String]) -> Result<Vec<RoomInfo>, AppError> {
        #[derive(Serialize)]
        struct Req<'a> {
            names: &'a [String],
        }
        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            rooms: Vec<RoomInfo>,
        }
        let resp: Resp = self.twirp("RoomService", "ListRooms", &Req { names }).await?;
        Ok(resp.rooms)
    }

    pub async fn delete_room(&self, room: &str) -> Result<(), AppError> {
        #[derive(Serialize)]
        struct Req<'a> {
            room: &'a str,
        }
        let _: serde_json::Value = self.twirp("RoomService", "DeleteRoom", &Req { room }).await?;
        Ok(())
    }

    pub async fn mute_published_track(
        &self,
        room: &str,
        identity: &str,
        track_sid: &str,
        muted: bool,
    ) -> Result<(), AppError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Req<'a> {
            room: &'a str,
            identity: &'a str,
            track_sid: &'a str,
            muted: bool,
        }
        let _: serde_json::Value = self
            .twirp(
                "RoomService",
                "MutePublishedTrack",
                &Req {
                    room,
                    identity,
                    track_sid,
                    muted,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn update_subscriptions(
        &self,
        room: &str,
        identity: &str,
        track_sids: &[String],
        subscribe: bool,
    ) -> Result<(), AppError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Req<'a> {
            room: &'a str,
            identity: &'a str,
            track_sids: &'a [String],
            subscribe: bool,
        }
        let _: serde_json::Value = self
            .twirp(
                "RoomService",
                "UpdateSubscriptions",
                &Req {
                    room,
                    identity,
                    track_sids,
                    subscribe,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn remove_participant(&self, room: &str, identity: &str) -> Result<(), AppError> {
        #[derive(Serialize)]
        struct Req<'a> {
            room: &'a str,
            identity: &'a str,
        }
        let _: serde_json::Value = self
            .twirp("RoomService", "RemoveParticipant", &Req { room, identity })
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Egress (recordings)
    // ------------------------------------------------------------------

    pub async fn start_room_recording(
        &self,
        room_name: &str,
        filepath: &str,
    ) -> Result<EgressInfo, AppError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct FileOutput<'a> {
            filepath: &'a str,
        }
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Req<'a> {
            room_name: &'a str,
            file_outputs: Vec<FileOutput<'a>>,
        }
        self.twirp(
            "Egress",
            "StartRoomCompositeEgress",
            &Req {
                room_name,
                file_outputs: vec![FileOutput { filepath }],
            },
        )
        .await
    }

    pub async fn stop_egress(&self, egress_id: &str) -> Result<EgressInfo, AppError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Req<'a> {
            egress_id: &'a str,
        }
        self.twirp("Egress", "StopEgress", &Req { egress_id }).await
    }

    pub async fn list_egress(&self, room_name: &str) -> Result<Vec<EgressInfo>, AppError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Req<'a> {
            room_name: &'a str,
        }
        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            items: Vec<EgressInfo>,
        }
        let resp: Resp = self.twirp("Egress", "ListEgress", &Req { room_name }).await?;
        Ok(resp.items)
    }

    // ------------------------------------------------------------------
    // Ingress
    // ------------------------------------------------------------------

    pub async fn create_ingress(
        &self,
        room_name: &str,
        name: &str,
        participant_identity: &str,
    ) -> Result<IngressInfo, AppError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Req<'a> {
            // RTMP input.
            input_type: i32,
            name: &'a str,
            room_name: &'a str,
            participant_identity: &'a str,
        }
        self.twirp(
            "Ingress",
            "CreateIngress",
            &Req {
                input_type: 0,
                name,
                room_name,
                participant_identity,
            },
        )
        .await
    }

    pub async fn list_ingress(&self, room_name: &str) -> Result<Vec<IngressInfo>, AppError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Req<'a> {
            room_name: &'a str,
        }
        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            items: Vec<IngressInfo>,
        }
        let resp: Resp = self.twirp("Ingress", "ListIngress", &Req { room_name }).await?;
        Ok(resp.items)
    }

    pub async fn delete_ingress(&self, ingress_id: &str) -> Result<IngressInfo, AppError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Req<'a> {
            ingress_id: &'a str,
        }
        self.twirp("Ingress", "DeleteIngress", &Req { ingress_id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_urls_are_normalized_to_http() {
        assert_eq!(http_url("ws://localhost:7880"), "http://localhost:7880");
        assert_eq!(http_url("wss://media.example.com"), "https://media.example.com");
        assert_eq!(http_url("http://localhost:7880"), "http://localhost:7880");
        assert_eq!(http_url("https://media.example.com"), "https://media.example.com");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let keys = SigningKeys {
            api_key: "devkey".to_string(),
            api_secret: "secret".to_string(),
        };
        let client = RoomClient::new(keys, "http://localhost:7880/".to_string());
        assert_eq!(client.base_url, "http://localhost:7880");
    }
}
