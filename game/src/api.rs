//! Typed game API over a pluggable transport.
//!
//! `Transport` is the only seam a front-end implements: `gloo-net` in the
//! browser, `reqwest` in the CLI, an in-memory fake in tests. Endpoint paths,
//! bodies and response decoding live here once.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::SyncError;
use crate::phase::GameType;
use crate::session::Difficulty;
use crate::wire::{
    CheckAnswerBody, CheckAnswerResponse, CheckPairBody, CheckPairResponse, CreateGameResponse, FlipBody,
    FlipResponse, GameSnapshot, parse_response,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// One HTTP exchange, relative to the API origin.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn post(path: String, body: Option<Value>) -> Self {
        Self { method: Method::Post, path, body }
    }
}

/// Sends a request and returns the raw response body.
///
/// Implementations map transport failures and non-success statuses to
/// [`SyncError::Network`]; decoding is left to [`GameApi`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<String, SyncError>;
}

pub(crate) fn create_game_path(game_type: GameType, difficulty: Difficulty) -> String {
    format!("/api/game?type={game_type}&difficulty={difficulty}")
}

pub(crate) fn game_path(game_id: &str) -> String {
    format!("/api/game/{game_id}")
}

pub(crate) fn flip_path(game_id: &str) -> String {
    format!("/api/game/{game_id}/flip")
}

pub(crate) fn check_pair_path(game_id: &str) -> String {
    format!("/api/game/{game_id}/check-pair")
}

pub(crate) fn check_answer_path(game_id: &str) -> String {
    format!("/api/game/{game_id}/check")
}

fn json_body<T: Serialize>(body: &T) -> Result<Value, SyncError> {
    serde_json::to_value(body).map_err(|e| SyncError::ResponseParse(e.to_string()))
}

/// The game endpoints, decoded.
#[derive(Clone, Debug)]
pub struct GameApi<T> {
    transport: T,
}

impl<T: Transport> GameApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST /api/game?type=..&difficulty=..`
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the transport or response decoding.
    pub async fn create_game(&self, game_type: GameType, difficulty: Difficulty) -> Result<CreateGameResponse, SyncError> {
        let request = ApiRequest::post(create_game_path(game_type, difficulty), None);
        let body = self.transport.send(request).await?;
        parse_response(&body)
    }

    /// `POST /api/game/{id}/flip`
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the transport or response decoding.
    pub async fn flip_card(&self, game_id: &str, card_id: u32) -> Result<FlipResponse, SyncError> {
        let body = json_body(&FlipBody { card_id })?;
        let body = self.transport.send(ApiRequest::post(flip_path(game_id), Some(body))).await?;
        parse_response(&body)
    }

    /// `POST /api/game/{id}/check-pair`
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the transport or response decoding.
    pub async fn check_pair(&self, game_id: &str, card_id1: u32, card_id2: u32) -> Result<CheckPairResponse, SyncError> {
        let body = json_body(&CheckPairBody { card_id1, card_id2 })?;
        let body = self.transport.send(ApiRequest::post(check_pair_path(game_id), Some(body))).await?;
        parse_response(&body)
    }

    /// `POST /api/game/{id}/check`
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the transport or response decoding.
    pub async fn check_answer(&self, game_id: &str, answer: Vec<u32>) -> Result<CheckAnswerResponse, SyncError> {
        let body = json_body(&CheckAnswerBody { answer })?;
        let body = self.transport.send(ApiRequest::post(check_answer_path(game_id), Some(body))).await?;
        parse_response(&body)
    }

    /// `GET /api/game/{id}`
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the transport or response decoding.
    pub async fn fetch_game(&self, game_id: &str) -> Result<GameSnapshot, SyncError> {
        let request = ApiRequest { method: Method::Get, path: game_path(game_id), body: None };
        let body = self.transport.send(request).await?;
        parse_response(&body)
    }

    /// `DELETE /api/game/{id}`. The response body carries nothing the client
    /// mirrors, so only transport failures and explicit errors surface.
    ///
    /// # Errors
    ///
    /// Any [`SyncError`] from the transport or response decoding.
    pub async fn delete_game(&self, game_id: &str) -> Result<(), SyncError> {
        let request = ApiRequest { method: Method::Delete, path: game_path(game_id), body: None };
        let body = self.transport.send(request).await?;
        parse_response::<Value>(&body).map(|_| ())
    }
}
