mod private {
    use crate::{
        error::Result,
        model::{artist::AssociatedArtists, credentials::CredentialsResponse, playlist::PlaylistCreated, PlainText},
    };

    pub trait Sealed {}

    /// Response types that know how their body is encoded.
    #[async_trait::async_trait]
    pub trait DecodeBody: Sealed + Sized {
        async fn decode(response: reqwest::Response) -> Result<Self>;
    }

    impl Sealed for PlainText {}

    #[async_trait::async_trait]
    impl DecodeBody for PlainText {
        async fn decode(response: reqwest::Response) -> Result<Self> {
            Ok(PlainText(response.text().await?))
        }
    }

    macro_rules! json_body {
        ($($response:ty),* $(,)?) => {
            $(
                impl Sealed for $response {}

                #[async_trait::async_trait]
                impl DecodeBody for $response {
                    async fn decode(response: reqwest::Response) -> Result<Self> {
                        Ok(response.json().await?)
                    }
                }
            )*
        };
    }

    json_body!(CredentialsResponse, AssociatedArtists, PlaylistCreated);
}

use std::{fmt::Debug, marker::PhantomData};

use log::{debug, error, trace};
use reqwest::Method;

pub(crate) use self::private::DecodeBody;
use super::BackendClient;
use crate::{error::Result, model::error::BackendErrorResponse};

/// A request to one of the backend's endpoints. Send it with [send_async](RequestBuilder::send_async).
///
/// `TResponse` is the type the response body is decoded into and `TReturn` the type handed back to the caller.
#[must_use = "requests do nothing until sent"]
pub struct RequestBuilder<TResponse, TReturn = TResponse> {
    client: BackendClient,
    method: Method,
    endpoint: &'static str,
    form: Vec<(&'static str, String)>,

    return_phantom: PhantomData<TReturn>,
    response_phantom: PhantomData<TResponse>,
}

impl<TResponse, TReturn> RequestBuilder<TResponse, TReturn> {
    pub(crate) fn new(method: Method, endpoint: &'static str, client: BackendClient) -> Self {
        Self {
            client,
            method,
            endpoint,
            form: Vec::new(),

            return_phantom: PhantomData,
            response_phantom: PhantomData,
        }
    }

    /// Appends a URL-encoded form field. Fields keep their order and a name may repeat.
    pub(crate) fn form_field<S>(mut self, name: &'static str, value: S) -> Self
    where
        S: Into<String>,
    {
        self.form.push((name, value.into()));
        self
    }

    pub fn form_fields(&self) -> &[(&'static str, String)] {
        &self.form
    }
}

impl<TResponse, TReturn> RequestBuilder<TResponse, TReturn>
where
    TResponse: DecodeBody + Debug,
    TReturn: From<TResponse>,
{
    /// Sends the request. Any non-success status is turned into [Error::Backend](crate::Error::Backend), with the
    /// message taken from the response body's `error` field if there is one.
    pub async fn send_async(self) -> Result<TReturn> {
        let url = self.client.endpoint_url(self.endpoint)?;
        debug!("{} {}", self.method, url);

        let mut request = self.client.http_client.request(self.method.clone(), url);

        if self.method == Method::POST {
            trace!("Request form: {:?}", self.form);
            request = request.form(&self.form);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            error!("Got {status} response from {}", self.endpoint);
            let body = response.text().await?;
            trace!("Error response: {body}");

            return Err(BackendErrorResponse::from_body(&body).into_error(status.as_u16()));
        }

        let response_body = TResponse::decode(response).await?;
        trace!("Body: {response_body:?}");

        Ok(response_body.into())
    }
}
