/// Read, update, delete and query methods shared by every model handle.
///
/// `$plural` names the collection methods (`find_users`, `count_users`).
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident, $plural:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: $crate::domain::RecordId,
                ) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake _with>](
                    &self,
                    id: $crate::domain::RecordId,
                    projection: $crate::schema::Projection,
                ) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get_with(id, projection).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<update_ $entity_name_snake>](
                    &self,
                    id: $crate::domain::RecordId,
                    patch: <$entity as $crate::actor_framework::Entity>::Patch,
                ) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.inner.update(id, patch).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](
                    &self,
                    id: $crate::domain::RecordId,
                ) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self, filter))]
                pub async fn [<find_ $plural>](
                    &self,
                    filter: $crate::actor_framework::Filter<$entity>,
                ) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner
                        .find(filter, $crate::schema::Projection::default())
                        .await
                        .map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<count_ $plural>](&self) -> Result<usize, $error> {
                    tracing::debug!("Sending request");
                    self.inner.count().await.map_err(<$error>::from)
                }

                /// Create from an untyped document; validation is identical to
                /// the typed path.
                #[tracing::instrument(skip(self, document))]
                pub async fn [<create_ $entity_name_snake _document>](
                    &self,
                    document: $crate::schema::Document,
                ) -> Result<$crate::domain::RecordId, $error> {
                    tracing::debug!("Sending request");
                    self.inner.create_document(document).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn shutdown(&self) -> Result<(), $error> {
                    tracing::debug!("Sending shutdown request");
                    self.inner.shutdown().await.map_err(<$error>::from)
                }
            }
        }
    };
}

macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident, $plural:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_methods!($client_name, $entity, $error, $entity_name_snake, $plural);
    };
}
