//! Activity and Wudje operations.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use myplant_core::{
    Activity, ActivitySignup, Error, PostWudjeRequest, RemoveRegistration, Result, Wud,
};

use crate::client::MyPlantClient;
use crate::endpoints::{self, ACTIVITIES_FIELD, ACTIVITY_FIELD, WUDJES_FIELD};

impl MyPlantClient {
    /// List all activities.
    #[instrument(skip(self))]
    pub async fn get_activities(&self) -> Result<Vec<Activity>> {
        let body: Value = self
            .dispatch::<(), _>(Method::GET, endpoints::ACTIVITIES, None)
            .await?;
        unwrap_field(body, ACTIVITIES_FIELD)
    }

    /// Fetch a single activity.
    #[instrument(skip(self))]
    pub async fn get_activity(&self, activity_id: &str) -> Result<Activity> {
        let body: Value = self
            .dispatch::<(), _>(Method::GET, &endpoints::activity(activity_id), None)
            .await?;
        unwrap_field(body, ACTIVITY_FIELD)
    }

    /// Sign up for an activity, or join its waitlist.
    ///
    /// Returns the server's response unchanged.
    #[instrument(skip(self, signup), fields(kind = ?signup.kind))]
    pub async fn join_activity(&self, activity_id: &str, signup: &ActivitySignup) -> Result<Value> {
        self.dispatch(Method::POST, &endpoints::activity(activity_id), Some(signup))
            .await
    }

    /// Cancel a signup or waitlist registration.
    ///
    /// The registration id is both the path segment and the body's `id`.
    #[instrument(skip(self, registration), fields(id = %registration.id))]
    pub async fn remove_activity(&self, registration: &RemoveRegistration) -> Result<Value> {
        self.dispatch(
            Method::DELETE,
            &endpoints::activity(&registration.id),
            Some(registration),
        )
        .await
    }

    /// List all Wudjes.
    #[instrument(skip(self))]
    pub async fn get_wudjes(&self) -> Result<Vec<Wud>> {
        let body: Value = self
            .dispatch::<(), _>(Method::GET, endpoints::WUDJES, None)
            .await?;
        unwrap_field(body, WUDJES_FIELD)
    }

    /// Post a new Wudje.
    #[instrument(skip(self, request))]
    pub async fn post_wudje(&self, request: &PostWudjeRequest) -> Result<Value> {
        self.dispatch(Method::POST, endpoints::WUDJES, Some(request))
            .await
    }
}

/// Take `field` out of a response envelope and decode it.
fn unwrap_field<T: DeserializeOwned>(mut body: Value, field: &str) -> Result<T> {
    let value = body
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| Error::decode(format!("response has no `{}` field", field)))?;
    Ok(serde_json::from_value(value)?)
}
