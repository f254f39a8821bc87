//! Owner contact routes

use crate::client::Client;
use crate::error::Result;
use crate::gateway::ApiRequest;
use crate::multipart::FormSpec;
use vreg_core::{Owner, OwnerForm, PhotoFile};

fn owner_form(form: &OwnerForm, photo: Option<PhotoFile>) -> FormSpec {
    let mut spec = FormSpec::new()
        .text("name", &form.name)
        .text("email", &form.email)
        .text("phone", &form.phone)
        .text("address", &form.address);
    if let Some(photo) = photo {
        spec = spec.file("photo", photo.file_name, photo.bytes);
    }
    spec
}

impl Client {
    pub async fn owners(&self) -> Result<Vec<Owner>> {
        self.gateway().fetch(&ApiRequest::get("/owners/")).await
    }

    pub async fn owner(&self, id: i64) -> Result<Owner> {
        self.gateway()
            .fetch(&ApiRequest::get(format!("/owners/{}/", id)))
            .await
    }

    pub async fn create_owner(&self, form: &OwnerForm, photo: Option<PhotoFile>) -> Result<Owner> {
        let request = ApiRequest::post("/owners/").multipart(owner_form(form, photo));
        self.gateway().fetch(&request).await
    }

    pub async fn update_owner(
        &self,
        id: i64,
        form: &OwnerForm,
        photo: Option<PhotoFile>,
    ) -> Result<Owner> {
        let request =
            ApiRequest::put(format!("/owners/{}/", id)).multipart(owner_form(form, photo));
        self.gateway().fetch(&request).await
    }

    pub async fn delete_owner(&self, id: i64) -> Result<()> {
        self.gateway()
            .execute(&ApiRequest::delete(format!("/owners/{}/", id)))
            .await?;
        Ok(())
    }
}
