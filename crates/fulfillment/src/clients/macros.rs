/// Generates one `FleetClient` method per fleet operation.
///
/// Each invocation expands to an async method that packs its arguments
/// into the matching [`FleetRequest`] variant, sends it, and awaits the
/// oneshot reply. The variant name is derived from the method name, so
/// `fn assign_drone(..)` talks to `FleetRequest::AssignDrone` and the
/// argument names must match the variant's fields.
///
/// [`FleetRequest`]: crate::fleet::FleetRequest
#[macro_export]
macro_rules! fleet_request {
    ($(#[$meta:meta])* fn $method:ident($($param:ident: $param_type:ty),* $(,)?) -> $return_type:ty) => {
        paste::paste! {
            impl FleetClient {
                $(#[$meta])*
                #[tracing::instrument(skip(self))]
                pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, FleetError> {
                    tracing::debug!("Sending request");
                    let (respond_to, response) = tokio::sync::oneshot::channel();
                    self.sender
                        .send(FleetRequest::[<$method:camel>] {
                            $($param,)*
                            respond_to,
                        })
                        .await
                        .map_err(|_| {
                            FleetError::ActorCommunicationError("Actor closed".to_string())
                        })?;
                    response.await.map_err(|_| {
                        FleetError::ActorCommunicationError("Actor dropped".to_string())
                    })?
                }
            }
        }
    };
}
