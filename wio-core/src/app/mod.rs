//! Node orchestration
//!
//! [`Node`] owns every collaborator and runs the cooperative tick. Within
//! one tick the order is fixed:
//!
//! 1. button handling
//! 2. page logic
//! 3. network supervisor (inbound messages are routed here)
//! 4. queued configuration work
//! 5. page sync from the fresh connection state
//! 6. display refresh (dirty lines, header icons)
//! 7. telemetry
//!
//! Until WiFi comes up (or the boot timeout passes) the panel shows the
//! scrollback log instead of a page.

mod handler;
pub mod pages;


pub use handler::{AppState, MessageRouter, Pending};

use wio_display::{Canvas, LogScreen, LogSink};
use wio_hal::{MqttLink, StorageMedia, WifiLink};
use wio_protocol::config::DeviceId;
use wio_protocol::topic::{config_topic, status_topic};
use wio_protocol::{encode_int, Switch};

use crate::config::{NodeConfig, ValidationError};
use crate::input::ButtonEvent;
use crate::net::{ConnectionState, NetworkSupervisor};
use crate::page::{PageCatalog, PageError};
use crate::render::{DrawMode, IconInputs, RenderError, Renderer};
use crate::timing::Interval;
use crate::topics::{RegistryError, TopicRegistry, FUNCTION_SLOT};
use crate::traits::SwitchOutput;

use pages::{DEMO_PAGE, HEATER_PAGE, NETWORK_PAGE};

/// Function topic before any configuration arrives
pub const DEFAULT_FUNCTION_TOPIC: &str = "home/1OG/Heizung";

/// Telemetry leaf for the WiFi RSSI
pub const RSSI_LEAF: &str = "rssi";

/// Telemetry leaf for the heater state
pub const HEATER_LEAF: &str = "heater";

/// Node errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeError {
    /// Configuration rejected
    Config(ValidationError),
    /// Topic registry rejected a topic
    Topic(RegistryError),
    /// Page access out of range
    Page(PageError),
    /// Drawing failed
    Render(RenderError),
}

impl From<ValidationError> for NodeError {
    fn from(e: ValidationError) -> Self {
        NodeError::Config(e)
    }
}

impl From<RegistryError> for NodeError {
    fn from(e: RegistryError) -> Self {
        NodeError::Topic(e)
    }
}

impl From<PageError> for NodeError {
    fn from(e: PageError) -> Self {
        NodeError::Page(e)
    }
}

impl From<RenderError> for NodeError {
    fn from(e: RenderError) -> Self {
        NodeError::Render(e)
    }
}

impl From<wio_display::DisplayError> for NodeError {
    fn from(e: wio_display::DisplayError) -> Self {
        NodeError::Render(RenderError::Display(e))
    }
}

/// Boot progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootPhase {
    /// `start` not called yet
    Idle,
    /// Log screen shown since this time (ms)
    Loading { since_ms: u32 },
    /// Pages shown
    Running,
}

/// The complete node
pub struct Node<C, W, M, S, H> {
    canvas: C,
    wifi: W,
    mqtt: M,
    storage: S,
    heater: H,

    device_id: DeviceId,
    log: LogScreen,
    renderer: Renderer,
    net: NetworkSupervisor,
    topics: TopicRegistry,
    pages: PageCatalog,
    state: AppState,

    boot: BootPhase,
    boot_screen_ms: u32,
    started_ms: u32,
    icon_timer: Interval,
    telemetry_timer: Interval,
    /// Storage presence at the last icon refresh
    storage_present: bool,
    /// Redraw the whole page on the next refresh
    full_redraw: bool,
}

impl<C, W, M, S, H> Node<C, W, M, S, H>
where
    C: Canvas,
    W: WifiLink,
    M: MqttLink,
    S: StorageMedia,
    H: SwitchOutput,
{
    /// Assemble a node; nothing is drawn or connected until [`start`](Self::start)
    pub fn new(
        config: &NodeConfig,
        canvas: C,
        wifi: W,
        mqtt: M,
        storage: S,
        heater: H,
    ) -> Result<Self, NodeError> {
        config.validate()?;

        let mut topics = TopicRegistry::new();
        let config_slot = config_topic(&config.device_id).map_err(RegistryError::from)?;
        topics.push(&config_slot)?;
        topics.push(DEFAULT_FUNCTION_TOPIC)?;

        let pages = pages::build_catalog(&config.device_id, DEFAULT_FUNCTION_TOPIC)?;
        let state = AppState::new(Switch::from(heater.is_on()));

        Ok(Self {
            canvas,
            wifi,
            mqtt,
            storage,
            heater,
            device_id: config.device_id.clone(),
            log: LogScreen::new(),
            renderer: Renderer::new(),
            net: NetworkSupervisor::new(config),
            topics,
            pages,
            state,
            boot: BootPhase::Idle,
            boot_screen_ms: config.intervals.boot_screen_ms,
            started_ms: 0,
            icon_timer: Interval::new(config.intervals.icon_refresh_ms),
            telemetry_timer: Interval::new(config.intervals.telemetry_ms),
            storage_present: false,
            full_redraw: true,
        })
    }

    /// Show the boot log and issue the first WiFi connect
    pub fn start(&mut self, now_ms: u32) -> Result<(), NodeError> {
        info!("node {=str} starting", self.device_id.as_str());
        self.started_ms = now_ms;
        self.log.set_active(true);
        self.net.begin(now_ms, &mut self.wifi, &mut self.log);
        self.boot = BootPhase::Loading { since_ms: now_ms };
        self.log.render(&mut self.canvas)?;
        Ok(())
    }

    /// Run one cooperative tick
    pub fn tick(&mut self, now_ms: u32, button: Option<ButtonEvent>) -> Result<(), NodeError> {
        if self.boot == BootPhase::Idle {
            self.start(now_ms)?;
        }

        if let BootPhase::Running = self.boot {
            if let Some(button) = button {
                self.on_button(button);
            }
        }
        self.page_logic(now_ms)?;

        {
            let mut router = MessageRouter::new(&self.topics, &mut self.heater, &mut self.state);
            self.net.tick(
                now_ms,
                &mut self.wifi,
                &mut self.mqtt,
                &self.topics,
                &mut self.log,
                &mut router,
            );
        }
        self.apply_pending(now_ms);
        self.sync_pages()?;

        match self.boot {
            BootPhase::Loading { since_ms } => {
                let elapsed = now_ms.wrapping_sub(since_ms);
                if self.net.connection_state().wifi.is_connected() || elapsed >= self.boot_screen_ms {
                    self.finish_boot()?;
                } else {
                    self.log.render(&mut self.canvas)?;
                }
            }
            BootPhase::Running => self.refresh_display(now_ms)?,
            BootPhase::Idle => {}
        }

        if self.telemetry_timer.poll(now_ms) {
            self.publish_telemetry();
        }
        Ok(())
    }

    fn finish_boot(&mut self) -> Result<(), NodeError> {
        info!("boot complete");
        self.log.set_active(false);
        self.boot = BootPhase::Running;
        self.storage_present = self.storage.is_present();
        self.full_redraw = true;
        self.icon_timer.reset();
        self.redraw()
    }

    fn on_button(&mut self, button: ButtonEvent) {
        debug!("button {=str}", button.as_str());
        match button {
            ButtonEvent::Left => {
                self.pages.prev();
                self.full_redraw = true;
            }
            ButtonEvent::Right => {
                self.pages.next();
                self.full_redraw = true;
            }
            ButtonEvent::Press if self.pages.current_index() == HEATER_PAGE => {
                let next = Switch::from(!self.state.heater().is_on());
                self.state.set_heater(&mut self.heater, next);
            }
            ButtonEvent::KeyC => self.full_redraw = true,
            _ => {}
        }
    }

    /// Per-page work that does not depend on this tick's network events
    fn page_logic(&mut self, now_ms: u32) -> Result<(), NodeError> {
        let uptime = now_ms.wrapping_sub(self.started_ms);
        pages::set_uptime(self.pages.get_mut(HEATER_PAGE)?, uptime)?;
        Ok(())
    }

    fn apply_pending(&mut self, now_ms: u32) {
        let pending = self.state.take_pending();

        if let Some(topic) = pending.function_topic {
            match self.topics.set(FUNCTION_SLOT, &topic) {
                Ok(true) => {
                    info!("function topic now {=str}", topic.as_str());
                    self.log.add("- Function: ", false);
                    self.log.add(&topic, true);
                }
                Ok(false) => {}
                Err(e) => warn!("function topic rejected: {}", e),
            }
        }

        if let Some((user, password)) = pending.credentials {
            self.net.set_credentials(&user, &password);
        }

        if let Some(broker) = pending.broker {
            self.net
                .change_broker(now_ms, broker, &mut self.mqtt, &self.topics, &mut self.log);
        }

        if pending.heater_changed {
            self.publish_status(HEATER_LEAF, self.state.heater_state().as_bytes());
        }
    }

    fn sync_pages(&mut self) -> Result<(), NodeError> {
        let conn = self.net.connection_state();
        let topic = self.topics.get(FUNCTION_SLOT).unwrap_or("");

        pages::sync_heater_page(self.pages.get_mut(HEATER_PAGE)?, self.state.heater(), topic, &conn)?;
        pages::sync_network_page(
            self.pages.get_mut(NETWORK_PAGE)?,
            &conn,
            &self.net.broker().host,
        )?;
        pages::sync_demo_page(self.pages.get_mut(DEMO_PAGE)?, &conn)?;
        Ok(())
    }

    fn refresh_display(&mut self, now_ms: u32) -> Result<(), NodeError> {
        if self.full_redraw {
            return self.redraw();
        }

        let page = self.pages.current_mut()?;
        let mask = page.take_dirty();
        if mask != 0 {
            self.renderer
                .update_lines(&mut self.canvas, page, mask, DrawMode::OnlyValue)?;
        }

        if self.icon_timer.poll(now_ms) {
            self.storage_present = self.storage.is_present();
            let inputs = IconInputs::new(self.net.take_activity(), self.storage_present);
            self.renderer
                .refresh_interface_icons(&mut self.canvas, &inputs, false)?;
        }
        Ok(())
    }

    /// Clear the panel and draw the current page
    fn redraw(&mut self) -> Result<(), NodeError> {
        let inputs = IconInputs::new(self.net.connection_state(), self.storage_present);
        let page = self.pages.current_mut()?;
        page.take_dirty();
        self.renderer.draw_full_page(&mut self.canvas, page, &inputs)?;
        self.full_redraw = false;
        Ok(())
    }

    fn publish_telemetry(&mut self) {
        if !self.net.connection_state().mqtt.is_connected() {
            return;
        }
        let rssi = encode_int(self.net.connection_state().wifi_strength_dbm);
        self.publish_status(RSSI_LEAF, rssi.as_bytes());
        self.publish_status(HEATER_LEAF, self.state.heater_state().as_bytes());
    }

    fn publish_status(&mut self, leaf: &str, payload: &[u8]) {
        let topic = match status_topic(&self.device_id, leaf) {
            Ok(topic) => topic,
            Err(e) => {
                warn!("status topic rejected: {}", e);
                return;
            }
        };
        if let Err(e) = self.net.publish(&mut self.mqtt, &topic, payload, false) {
            debug!("publish {=str} skipped: {}", topic.as_str(), e);
        }
    }

    /// Switch to page `index`; it is drawn in full on the next tick
    pub fn show_page(&mut self, index: usize) -> Result<(), NodeError> {
        self.pages.select(index)?;
        self.full_redraw = true;
        Ok(())
    }

    /// Connectivity snapshot
    pub fn connection_state(&self) -> ConnectionState {
        self.net.connection_state()
    }

    pub fn boot_phase(&self) -> BootPhase {
        self.boot
    }

    pub fn app_state(&self) -> &AppState {
        &self.state
    }

    pub fn topics(&self) -> &TopicRegistry {
        &self.topics
    }

    pub fn pages(&self) -> &PageCatalog {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut PageCatalog {
        &mut self.pages
    }

    pub fn supervisor(&self) -> &NetworkSupervisor {
        &self.net
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn log(&self) -> &LogScreen {
        &self.log
    }

    /// Append to the scrollback log
    pub fn add_log(&mut self, text: &str, append: bool) {
        self.log.add_log(text, append);
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn wifi_mut(&mut self) -> &mut W {
        &mut self.wifi
    }

    pub fn mqtt_mut(&mut self) -> &mut M {
        &mut self.mqtt
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn heater(&self) -> &H {
        &self.heater
    }
}
