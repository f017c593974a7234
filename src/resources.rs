// Demo resources served by the local invocation host

use proxy_router::{
    Handlers, InvocationContext, ProxyRequest, ProxyResponse, Resource, RouteError,
};
use serde_json::json;

/// Registry served by the binary
pub fn handlers() -> Handlers {
    Handlers::new()
        .with("/task/{taskId}", Task)
        .with("/echo", Echo)
}

/// Reads a task by id. TRACE is declared but has no callback.
pub struct Task;

impl Resource for Task {
    fn allowed_methods(&self) -> &[&str] {
        &["GET", "TRACE"]
    }

    fn get(
        &self,
        _ctx: &InvocationContext,
        req: &ProxyRequest,
        res: &mut ProxyResponse,
    ) -> Result<(), RouteError> {
        let Some(task_id) = req.path_parameter("taskId") else {
            return res.set_status(400);
        };

        res.status_code = 200;
        res.set_body(&json!({ "taskId": task_id, "path": req.path() }))
    }
}

/// Reflects the request back to the caller
pub struct Echo;

impl Resource for Echo {
    fn allowed_methods(&self) -> &[&str] {
        &["GET", "POST"]
    }

    fn get(
        &self,
        ctx: &InvocationContext,
        req: &ProxyRequest,
        res: &mut ProxyResponse,
    ) -> Result<(), RouteError> {
        res.status_code = 200;
        res.set_body(&json!({
            "requestId": ctx.request_id(),
            "method": req.method(),
            "path": req.path(),
            "q": req.query_parameter("q"),
        }))
    }

    fn post(
        &self,
        ctx: &InvocationContext,
        req: &ProxyRequest,
        res: &mut ProxyResponse,
    ) -> Result<(), RouteError> {
        if ctx.is_expired() || ctx.is_cancelled() {
            res.set_status(504)?;
            return Err(RouteError::handler(format!(
                "echo: request `{}` ran out of time",
                ctx.request_id()
            )));
        }

        let payload: serde_json::Value = match serde_json::from_str(req.body().unwrap_or("null")) {
            Ok(payload) => payload,
            Err(e) => {
                res.set_status(400)?;
                return Err(RouteError::handler(e));
            }
        };

        res.status_code = 200;
        res.set_body(&json!({ "requestId": ctx.request_id(), "received": payload }))
    }
}
