//! Compute façade
//!
//! One method per compute operation. Each builds a resource from its
//! arguments and forwards to the generic operations in [`crate::resource`].

use super::metadata;
use super::server::perform;
use super::server_ip::{flatten, ips_path};
use super::service::{change, ServiceChange};
use super::*;
use crate::cloud::client::CloudClient;
use crate::cloud::http::HttpMethod;
use crate::error::{Error, Result};
use crate::resource::ops::{self, call, ListOptions};
use crate::resource::request::translate_response;
use crate::resource::schema::{from_id, with_field, Resource, ResourceRef};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::{Map, Value};
use std::time::Duration;

/// Target and budget of [`Compute::wait_for_server`]
#[derive(Debug, Clone, PartialEq)]
pub struct WaitOptions {
    pub status: String,
    pub failures: Vec<String>,
    pub interval: Duration,
    pub wait: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            status: "ACTIVE".to_string(),
            failures: vec!["ERROR".to_string()],
            interval: Duration::from_secs(2),
            wait: Duration::from_secs(120),
        }
    }
}

impl WaitOptions {
    pub fn status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            ..Self::default()
        }
    }
}

fn list_options(details: bool, paginated: bool, query: &[(&str, &str)]) -> ListOptions {
    query.iter().fold(
        ListOptions::new().details(details).paginated(paginated),
        |options, (key, value)| options.filter(*key, *value),
    )
}

/// Resolve a resource nested under a server, e.g. an interface
fn under_server<R: Resource>(
    res: impl Into<ResourceRef<R>>,
    server: impl Into<ResourceRef<Server>>,
) -> Result<R> {
    let server_id = server.into().id()?;
    with_field(&res.into().into_resource()?, "server_id", Value::String(server_id))
}

/// A collection resource scoped to one server
fn server_scoped<R: Resource>(server: impl Into<ResourceRef<Server>>) -> Result<R> {
    let server_id = server.into().id()?;
    with_field(&R::default(), "server_id", Value::String(server_id))
}

/// A list that fails before its first request
fn failed<'a, T: Send + 'a>(error: Error) -> BoxStream<'a, Result<T>> {
    stream::once(async move { Err(error) }).boxed()
}

fn string_map<I, K, V>(items: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    items
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect()
}

/// Compute service operations
pub struct Compute<'a> {
    pub(crate) client: &'a CloudClient,
}

impl<'a> Compute<'a> {
    async fn get_by_ref<R: Resource>(&self, res: impl Into<ResourceRef<R>>) -> Result<R> {
        ops::get(self.client, res.into().into_resource()?).await
    }

    async fn delete_by_ref<R: Resource>(
        &self,
        res: impl Into<ResourceRef<R>>,
        ignore_missing: bool,
    ) -> Result<()> {
        ops::delete(self.client, res.into().into_resource()?, &[], ignore_missing).await?;
        Ok(())
    }

    async fn find_top_level<R: Resource>(
        &self,
        name_or_id: &str,
        ignore_missing: bool,
        paginated: bool,
    ) -> Result<Option<R>> {
        ops::find(self.client, &R::default(), name_or_id, ignore_missing, paginated).await
    }

    async fn action(&self, server: impl Into<ResourceRef<Server>>, action: ServerAction) -> Result<()> {
        let id = server.into().id()?;
        perform(self.client, &id, &action).await?;
        Ok(())
    }

    // Extensions

    pub async fn find_extension(&self, name_or_id: &str, ignore_missing: bool) -> Result<Option<Extension>> {
        self.find_top_level(name_or_id, ignore_missing, false).await
    }

    pub fn extensions(&self) -> BoxStream<'a, Result<Extension>> {
        ops::list(self.client, Extension::default(), ListOptions::new())
    }

    // Flavors

    pub async fn find_flavor(&self, name_or_id: &str, ignore_missing: bool) -> Result<Option<Flavor>> {
        self.find_top_level(name_or_id, ignore_missing, true).await
    }

    pub async fn create_flavor(&self, attrs: Flavor) -> Result<Flavor> {
        ops::create(self.client, attrs).await
    }

    pub async fn delete_flavor(&self, flavor: impl Into<ResourceRef<Flavor>>, ignore_missing: bool) -> Result<()> {
        self.delete_by_ref(flavor, ignore_missing).await
    }

    pub async fn get_flavor(&self, flavor: impl Into<ResourceRef<Flavor>>) -> Result<Flavor> {
        self.get_by_ref(flavor).await
    }

    /// Flavors; `details` selects `/flavors/detail`
    pub fn flavors(&self, details: bool, paginated: bool, query: &[(&str, &str)]) -> BoxStream<'a, Result<Flavor>> {
        ops::list(self.client, Flavor::default(), list_options(details, paginated, query))
    }

    pub async fn query_flavor_extra_specs(&self, flavor_id: &str) -> Result<ExtraSpecs> {
        let specs = ExtraSpecs {
            flavor_id: Some(flavor_id.to_string()),
            ..Default::default()
        };
        ops::get(self.client, specs).await
    }

    // Images

    pub async fn delete_image(&self, image: impl Into<ResourceRef<Image>>, ignore_missing: bool) -> Result<()> {
        self.delete_by_ref(image, ignore_missing).await
    }

    pub async fn find_image(&self, name_or_id: &str, ignore_missing: bool) -> Result<Option<Image>> {
        self.find_top_level(name_or_id, ignore_missing, true).await
    }

    pub async fn get_image(&self, image: impl Into<ResourceRef<Image>>) -> Result<Image> {
        self.get_by_ref(image).await
    }

    pub fn images(&self, details: bool, query: &[(&str, &str)]) -> BoxStream<'a, Result<Image>> {
        ops::list(self.client, Image::default(), list_options(details, true, query))
    }

    /// An image holding only its id and metadata
    pub async fn get_image_metadata(&self, image: impl Into<ResourceRef<Image>>) -> Result<Image> {
        let id = image.into().id()?;
        let metadata = metadata::get::<Image>(self.client, &id, None).await?;
        image_with_metadata(id, metadata)
    }

    /// Merge `items` into the image metadata; returns the merged result
    pub async fn set_image_metadata<I, K, V>(&self, image: impl Into<ResourceRef<Image>>, items: I) -> Result<Image>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let id = image.into().id()?;
        let metadata = metadata::set::<Image>(self.client, &id, string_map(items)).await?;
        image_with_metadata(id, metadata)
    }

    /// Delete metadata keys, one request per key
    pub async fn delete_image_metadata(&self, image: impl Into<ResourceRef<Image>>, keys: &[&str]) -> Result<()> {
        let id = image.into().id()?;
        metadata::delete::<Image>(self.client, &id, keys).await
    }

    // Keypairs

    pub async fn create_keypair(&self, attrs: Keypair) -> Result<Keypair> {
        ops::create(self.client, attrs).await
    }

    pub async fn delete_keypair(&self, keypair: impl Into<ResourceRef<Keypair>>, ignore_missing: bool) -> Result<()> {
        self.delete_by_ref(keypair, ignore_missing).await
    }

    pub async fn get_keypair(&self, keypair: impl Into<ResourceRef<Keypair>>) -> Result<Keypair> {
        self.get_by_ref(keypair).await
    }

    pub async fn find_keypair(&self, name: &str, ignore_missing: bool) -> Result<Option<Keypair>> {
        self.find_top_level(name, ignore_missing, false).await
    }

    pub fn keypairs(&self) -> BoxStream<'a, Result<Keypair>> {
        ops::list(self.client, Keypair::default(), ListOptions::new())
    }

    // Limits

    pub async fn get_limits(&self) -> Result<Limits> {
        ops::get(self.client, Limits::default()).await
    }

    // Servers

    pub async fn create_server(&self, attrs: Server) -> Result<Server> {
        ops::create(self.client, attrs).await
    }

    /// Delete a server; `force` issues `forceDelete` instead of a plain
    /// delete
    pub async fn delete_server(
        &self,
        server: impl Into<ResourceRef<Server>>,
        ignore_missing: bool,
        force: bool,
    ) -> Result<()> {
        if !force {
            return self.delete_by_ref(server, ignore_missing).await;
        }

        let id = server.into().id()?;
        if id.is_empty() {
            return if ignore_missing {
                Ok(())
            } else {
                Err(Error::MissingParameter(Server::ID_KEY.to_string()))
            };
        }
        match perform(self.client, &id, &ServerAction::ForceDelete).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() && ignore_missing => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub async fn find_server(&self, name_or_id: &str, ignore_missing: bool) -> Result<Option<Server>> {
        self.find_top_level(name_or_id, ignore_missing, true).await
    }

    pub async fn get_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<Server> {
        self.get_by_ref(server).await
    }

    /// Servers; `details` selects `/servers/detail`
    pub fn servers(&self, details: bool, paginated: bool, query: &[(&str, &str)]) -> BoxStream<'a, Result<Server>> {
        ops::list(self.client, Server::default(), list_options(details, paginated, query))
    }

    /// Send the populated fields of `attrs` as an update of `server`
    pub async fn update_server(&self, server: impl Into<ResourceRef<Server>>, attrs: Server) -> Result<Server> {
        let id = server.into().id()?;
        let res = with_field(&attrs, Server::ID_KEY, Value::String(id))?;
        ops::update(self.client, res).await
    }

    pub async fn reset_server_state(&self, server: impl Into<ResourceRef<Server>>, state: &str) -> Result<()> {
        self.action(server, ServerAction::ResetState(state.to_string())).await
    }

    pub async fn reboot_server(&self, server: impl Into<ResourceRef<Server>>, reboot_type: RebootType) -> Result<()> {
        self.action(server, ServerAction::Reboot(reboot_type)).await
    }

    /// Rebuild from an image; returns the server as the service reports it
    pub async fn rebuild_server(
        &self,
        server: impl Into<ResourceRef<Server>>,
        name: &str,
        admin_password: &str,
        options: RebuildOptions,
    ) -> Result<Server> {
        let id = server.into().id()?;
        let action = ServerAction::Rebuild {
            name: name.to_string(),
            admin_password: admin_password.to_string(),
            options,
        };
        let response = perform(self.client, &id, &action).await?;
        let mut rebuilt: Server = from_id(&id)?;
        translate_response(&mut rebuilt, response)?;
        Ok(rebuilt)
    }

    pub async fn resize_server(
        &self,
        server: impl Into<ResourceRef<Server>>,
        flavor: impl Into<ResourceRef<Flavor>>,
    ) -> Result<()> {
        let flavor_id = flavor.into().id()?;
        self.action(server, ServerAction::Resize(flavor_id)).await
    }

    pub async fn confirm_server_resize(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::ConfirmResize).await
    }

    pub async fn revert_server_resize(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::RevertResize).await
    }

    pub async fn create_server_image(
        &self,
        server: impl Into<ResourceRef<Server>>,
        name: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Result<()> {
        let action = ServerAction::CreateImage {
            name: name.to_string(),
            metadata,
        };
        self.action(server, action).await
    }

    pub async fn add_security_group_to_server(
        &self,
        server: impl Into<ResourceRef<Server>>,
        security_group: &str,
    ) -> Result<()> {
        self.action(server, ServerAction::AddSecurityGroup(security_group.to_string()))
            .await
    }

    pub async fn remove_security_group_from_server(
        &self,
        server: impl Into<ResourceRef<Server>>,
        security_group: &str,
    ) -> Result<()> {
        self.action(server, ServerAction::RemoveSecurityGroup(security_group.to_string()))
            .await
    }

    pub async fn add_fixed_ip_to_server(&self, server: impl Into<ResourceRef<Server>>, network_id: &str) -> Result<()> {
        self.action(server, ServerAction::AddFixedIp(network_id.to_string())).await
    }

    pub async fn remove_fixed_ip_from_server(&self, server: impl Into<ResourceRef<Server>>, address: &str) -> Result<()> {
        self.action(server, ServerAction::RemoveFixedIp(address.to_string())).await
    }

    pub async fn add_floating_ip_to_server(
        &self,
        server: impl Into<ResourceRef<Server>>,
        address: &str,
        fixed_address: Option<&str>,
    ) -> Result<()> {
        let action = ServerAction::AddFloatingIp {
            address: address.to_string(),
            fixed_address: fixed_address.map(str::to_string),
        };
        self.action(server, action).await
    }

    pub async fn remove_floating_ip_from_server(
        &self,
        server: impl Into<ResourceRef<Server>>,
        address: &str,
    ) -> Result<()> {
        self.action(server, ServerAction::RemoveFloatingIp(address.to_string()))
            .await
    }

    pub async fn pause_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::Pause).await
    }

    pub async fn unpause_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::Unpause).await
    }

    pub async fn suspend_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::Suspend).await
    }

    pub async fn resume_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::Resume).await
    }

    pub async fn lock_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::Lock).await
    }

    pub async fn unlock_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::Unlock).await
    }

    pub async fn rescue_server(
        &self,
        server: impl Into<ResourceRef<Server>>,
        admin_password: Option<&str>,
        image_id: Option<&str>,
    ) -> Result<()> {
        let action = ServerAction::Rescue {
            admin_password: admin_password.map(str::to_string),
            image_id: image_id.map(str::to_string),
        };
        self.action(server, action).await
    }

    pub async fn unrescue_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::Unrescue).await
    }

    pub async fn evacuate_server(
        &self,
        server: impl Into<ResourceRef<Server>>,
        host: Option<&str>,
        admin_password: Option<&str>,
        force: Option<bool>,
    ) -> Result<()> {
        let action = ServerAction::Evacuate {
            host: host.map(str::to_string),
            admin_password: admin_password.map(str::to_string),
            force,
        };
        self.action(server, action).await
    }

    pub async fn start_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::Start).await
    }

    pub async fn stop_server(&self, server: impl Into<ResourceRef<Server>>, stop_type: StopType) -> Result<()> {
        self.action(server, ServerAction::Stop(stop_type)).await
    }

    pub async fn shelve_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::Shelve).await
    }

    pub async fn unshelve_server(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        self.action(server, ServerAction::Unshelve).await
    }

    /// Poll until the server reaches `options.status`.
    ///
    /// Fails with `ResourceFailure` as soon as one of `options.failures` is
    /// seen, and with `Timeout` once `options.wait` has elapsed.
    pub async fn wait_for_server(&self, server: impl Into<ResourceRef<Server>>, options: WaitOptions) -> Result<Server> {
        let server = server.into().into_resource()?;
        let failures: Vec<&str> = options.failures.iter().map(String::as_str).collect();
        ops::wait_for_status(
            self.client,
            server,
            &options.status,
            &failures,
            options.interval,
            options.wait,
        )
        .await
    }

    /// Console log of the server, optionally only the last `lines`
    pub async fn get_server_console_output(
        &self,
        server: impl Into<ResourceRef<Server>>,
        lines: Option<u32>,
    ) -> Result<String> {
        let id = server.into().id()?;
        let response = perform(self.client, &id, &ServerAction::ConsoleOutput(lines)).await?;
        Ok(response
            .get("output")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    // Server metadata

    /// A server holding only its id and metadata; `key` narrows to one item
    pub async fn get_server_metadata(&self, server: impl Into<ResourceRef<Server>>, key: Option<&str>) -> Result<Server> {
        let id = server.into().id()?;
        let metadata = metadata::get::<Server>(self.client, &id, key).await?;
        server_with_metadata(id, metadata)
    }

    /// Merge `items` into the server metadata; other keys are kept
    pub async fn set_server_metadata<I, K, V>(&self, server: impl Into<ResourceRef<Server>>, items: I) -> Result<Server>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let id = server.into().id()?;
        let metadata = metadata::set::<Server>(self.client, &id, string_map(items)).await?;
        server_with_metadata(id, metadata)
    }

    /// Create or replace one metadata item
    pub async fn update_server_metadata(
        &self,
        server: impl Into<ResourceRef<Server>>,
        key: &str,
        value: &str,
    ) -> Result<Server> {
        let id = server.into().id()?;
        let metadata =
            metadata::update::<Server>(self.client, &id, key, Value::String(value.to_string())).await?;
        server_with_metadata(id, metadata)
    }

    /// Delete metadata keys, one request per key
    pub async fn delete_server_metadata(&self, server: impl Into<ResourceRef<Server>>, keys: &[&str]) -> Result<()> {
        let id = server.into().id()?;
        metadata::delete::<Server>(self.client, &id, keys).await
    }

    // Server interfaces

    pub async fn create_server_interface(
        &self,
        server: impl Into<ResourceRef<Server>>,
        attrs: ServerInterface,
    ) -> Result<ServerInterface> {
        ops::create(self.client, under_server(attrs, server)?).await
    }

    pub async fn delete_server_interface(
        &self,
        server_interface: impl Into<ResourceRef<ServerInterface>>,
        server: impl Into<ResourceRef<Server>>,
        ignore_missing: bool,
    ) -> Result<()> {
        let res = under_server(server_interface, server)?;
        ops::delete(self.client, res, &[], ignore_missing).await?;
        Ok(())
    }

    pub async fn get_server_interface(
        &self,
        server_interface: impl Into<ResourceRef<ServerInterface>>,
        server: impl Into<ResourceRef<Server>>,
    ) -> Result<ServerInterface> {
        ops::get(self.client, under_server(server_interface, server)?).await
    }

    pub fn server_interfaces(&self, server: impl Into<ResourceRef<Server>>) -> BoxStream<'a, Result<ServerInterface>> {
        match server_scoped::<ServerInterface>(server) {
            Ok(template) => ops::list(self.client, template, ListOptions::new()),
            Err(e) => failed(e),
        }
    }

    // Server IPs

    /// Addresses of a server, optionally of a single network
    pub fn server_ips(
        &self,
        server: impl Into<ResourceRef<Server>>,
        network_label: Option<&str>,
    ) -> BoxStream<'a, Result<ServerIp>> {
        let client = self.client;
        let server = server.into();
        let label = network_label.map(str::to_string);
        stream::once(async move {
            let id = server.id()?;
            let body = call::<Server>(client, HttpMethod::Get, &ips_path(&id, label.as_deref()), None).await?;
            let ips = flatten(body, label.as_deref());
            Ok::<_, Error>(stream::iter(ips.into_iter().map(Ok::<_, Error>)))
        })
        .try_flatten()
        .boxed()
    }

    // Availability zones

    /// Availability zones; `details` includes hosts and needs admin rights
    pub fn availability_zones(&self, details: bool) -> BoxStream<'a, Result<AvailabilityZone>> {
        ops::list(
            self.client,
            AvailabilityZone::default(),
            ListOptions::new().details(details),
        )
    }

    // Server groups

    pub async fn create_server_group(&self, attrs: ServerGroup) -> Result<ServerGroup> {
        ops::create(self.client, attrs).await
    }

    pub async fn delete_server_group(
        &self,
        server_group: impl Into<ResourceRef<ServerGroup>>,
        ignore_missing: bool,
    ) -> Result<()> {
        self.delete_by_ref(server_group, ignore_missing).await
    }

    pub async fn find_server_group(&self, name_or_id: &str, ignore_missing: bool) -> Result<Option<ServerGroup>> {
        self.find_top_level(name_or_id, ignore_missing, false).await
    }

    pub async fn get_server_group(&self, server_group: impl Into<ResourceRef<ServerGroup>>) -> Result<ServerGroup> {
        self.get_by_ref(server_group).await
    }

    pub fn server_groups(&self, query: &[(&str, &str)]) -> BoxStream<'a, Result<ServerGroup>> {
        ops::list(self.client, ServerGroup::default(), list_options(false, false, query))
    }

    // Hypervisors

    pub fn hypervisors(&self) -> BoxStream<'a, Result<Hypervisor>> {
        ops::list(self.client, Hypervisor::default(), ListOptions::new())
    }

    pub async fn find_hypervisor(&self, name_or_id: &str, ignore_missing: bool) -> Result<Option<Hypervisor>> {
        self.find_top_level(name_or_id, ignore_missing, false).await
    }

    pub async fn get_hypervisor(&self, hypervisor: impl Into<ResourceRef<Hypervisor>>) -> Result<Hypervisor> {
        self.get_by_ref(hypervisor).await
    }

    // Services

    pub async fn get_service(&self, service: impl Into<ResourceRef<Service>>) -> Result<Service> {
        self.get_by_ref(service).await
    }

    pub async fn force_service_down(
        &self,
        service: impl Into<ResourceRef<Service>>,
        host: &str,
        binary: &str,
    ) -> Result<Service> {
        let service = service.into().into_resource()?;
        change(self.client, service, host, binary, ServiceChange::ForceDown).await
    }

    pub async fn disable_service(
        &self,
        service: impl Into<ResourceRef<Service>>,
        host: &str,
        binary: &str,
        disabled_reason: Option<&str>,
    ) -> Result<Service> {
        let service = service.into().into_resource()?;
        let reason = disabled_reason.map(str::to_string);
        change(self.client, service, host, binary, ServiceChange::Disable(reason)).await
    }

    pub async fn enable_service(
        &self,
        service: impl Into<ResourceRef<Service>>,
        host: &str,
        binary: &str,
    ) -> Result<Service> {
        let service = service.into().into_resource()?;
        change(self.client, service, host, binary, ServiceChange::Enable).await
    }

    pub fn services(&self) -> BoxStream<'a, Result<Service>> {
        ops::list(self.client, Service::default(), ListOptions::new())
    }

    // Volume attachments

    pub async fn create_volume_attachment(
        &self,
        server: impl Into<ResourceRef<Server>>,
        attrs: VolumeAttachment,
    ) -> Result<VolumeAttachment> {
        ops::create(self.client, under_server(attrs, server)?).await
    }

    /// Send the populated fields of `volume_attachment` as an update
    pub async fn update_volume_attachment(
        &self,
        volume_attachment: impl Into<ResourceRef<VolumeAttachment>>,
        server: impl Into<ResourceRef<Server>>,
    ) -> Result<VolumeAttachment> {
        ops::update(self.client, under_server(volume_attachment, server)?).await
    }

    /// Detach a volume; `force_del` detaches it while it is in use
    pub async fn delete_volume_attachment(
        &self,
        volume_attachment: impl Into<ResourceRef<VolumeAttachment>>,
        server: impl Into<ResourceRef<Server>>,
        force_del: bool,
        ignore_missing: bool,
    ) -> Result<()> {
        let res = under_server(volume_attachment, server)?;
        let params = if force_del {
            vec![("delete_flag", "1".to_string())]
        } else {
            Vec::new()
        };
        ops::delete(self.client, res, &params, ignore_missing).await?;
        Ok(())
    }

    pub async fn get_volume_attachment(
        &self,
        volume_attachment: impl Into<ResourceRef<VolumeAttachment>>,
        server: impl Into<ResourceRef<Server>>,
    ) -> Result<VolumeAttachment> {
        ops::get(self.client, under_server(volume_attachment, server)?).await
    }

    pub fn volume_attachments(&self, server: impl Into<ResourceRef<Server>>) -> BoxStream<'a, Result<VolumeAttachment>> {
        match server_scoped::<VolumeAttachment>(server) {
            Ok(template) => ops::list(self.client, template, ListOptions::new()),
            Err(e) => failed(e),
        }
    }

    // Tags

    pub async fn tags(&self, server: impl Into<ResourceRef<Server>>) -> Result<Tag> {
        ops::get(self.client, server_scoped::<Tag>(server)?).await
    }

    /// Replace the tag set of a server
    pub async fn create_tags<I, T>(&self, server: impl Into<ResourceRef<Server>>, tags: I) -> Result<Tag>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut res = server_scoped::<Tag>(server)?;
        res.tags = Some(tags.into_iter().map(Into::into).collect());
        ops::create(self.client, res).await
    }

    pub async fn delete_all_tags(&self, server: impl Into<ResourceRef<Server>>) -> Result<()> {
        ops::delete(self.client, server_scoped::<Tag>(server)?, &[], false).await?;
        Ok(())
    }

    // Instance actions

    pub fn instance_actions(&self, server: impl Into<ResourceRef<Server>>) -> BoxStream<'a, Result<InstanceAction>> {
        match server_scoped::<InstanceAction>(server) {
            Ok(template) => ops::list(self.client, template, ListOptions::new()),
            Err(e) => failed(e),
        }
    }

    pub async fn get_instance_action(
        &self,
        server: impl Into<ResourceRef<Server>>,
        request_id: &str,
    ) -> Result<InstanceAction> {
        let res = server_scoped::<InstanceAction>(server)?;
        let res = with_field(&res, InstanceAction::ID_KEY, Value::String(request_id.to_string()))?;
        ops::get(self.client, res).await
    }

    // Quotas

    pub async fn query_quota(&self, project_id: &str) -> Result<Quota> {
        ops::get(self.client, from_id::<Quota>(project_id)?).await
    }

    pub async fn query_quota_default(&self, project_id: &str) -> Result<QuotaDefault> {
        let res = QuotaDefault {
            project_id: Some(project_id.to_string()),
            ..Default::default()
        };
        ops::get(self.client, res).await
    }
}

fn server_with_metadata(id: String, metadata: Map<String, Value>) -> Result<Server> {
    Ok(Server {
        id: Some(id),
        metadata: Some(metadata),
        ..Default::default()
    })
}

fn image_with_metadata(id: String, metadata: Map<String, Value>) -> Result<Image> {
    Ok(Image {
        id: Some(id),
        metadata: Some(metadata),
        ..Default::default()
    })
}
