// crates/learnsync-cli/src/rpc_client.rs
//
// Lightweight JSON-RPC client that POSTs to the learnsync-daemon endpoint.

use serde::de::DeserializeOwned;

use learnsync_rpc::{JsonRpcRequest, JsonRpcResponse, SERVICE_NAME};

/// Send a JSON-RPC call to the daemon and return the raw envelope.
pub async fn rpc_call(
    endpoint: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<JsonRpcResponse, Box<dyn std::error::Error>> {
    let request = JsonRpcRequest {
        method: method.to_string(),
        params,
    };

    let client = reqwest::Client::new();
    let resp = client
        .post(call_url(endpoint))
        .json(&request)
        .send()
        .await?;

    let rpc_response: JsonRpcResponse = resp.json().await?;
    Ok(rpc_response)
}

/// Call a method and decode its result, turning an error envelope into `Err`.
pub async fn call<T: DeserializeOwned>(
    endpoint: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<T, Box<dyn std::error::Error>> {
    let response = rpc_call(endpoint, method, params).await?;
    if !response.success {
        let message = response
            .error
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(format!("{} failed: {}", method, message).into());
    }
    let result = response
        .result
        .ok_or_else(|| format!("{} returned no result", method))?;
    Ok(serde_json::from_value(result)?)
}

/// Full URL of the daemon's JSON-RPC route.
fn call_url(endpoint: &str) -> String {
    format!("{}/{}/Call", endpoint.trim_end_matches('/'), SERVICE_NAME)
}
