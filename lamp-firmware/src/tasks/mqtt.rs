// MQTT Bridge Task - Verbindung zum Mesh-Gateway
use defmt::{Debug2Format, debug, error, info, warn};
use embassy_futures::select::{Either3, select3};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Timer, with_timeout};

use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use lamp_core::MeshEvent;

use crate::config::*;
use crate::tasks::wifi::wait_for_network;
use crate::{MeshEventSender, StatusReplyReceiver};

/// MQTT Bridge Task - läuft parallel zum Lampen-Task
///
/// Der Mesh-Stack läuft auf dem Gateway. Dieser Task übersetzt zwischen
/// Gateway-Topics und Lampen-Task:
/// - `MQTT_TOPIC_PROVISION` → Provisioning-Ereignisse
/// - `MQTT_TOPIC_COMMAND` → Anwendungs-Nachrichten (Opcode + Payload)
/// - `MQTT_TOPIC_PRESET` → Farb-Presets als "set color" Nachricht
/// - Status-Antworten → `MQTT_TOPIC_STATUS`
///
/// Bei Fehlern wird nach `MQTT_RECONNECT_DELAY_SECS` neu verbunden.
/// Wiederholungen einzelner Nachrichten gibt es nicht (QoS 0).
///
/// # Parameter
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `events`: Channel Sender für Mesh-Ereignisse an den Lampen-Task
/// - `replies`: Channel Receiver für Status-Antworten vom Lampen-Task
#[embassy_executor::task]
pub async fn mqtt_bridge_task(
    stack: &'static Stack<'static>,
    events: MeshEventSender,
    replies: StatusReplyReceiver,
) {
    info!("MQTT: Bridge task started, waiting for network...");
    wait_for_network(stack).await;

    loop {
        match mqtt_connect_and_bridge(stack, &events, &replies).await {
            Ok(_) => warn!("MQTT: Connection closed normally"),
            Err(e) => error!("MQTT: Error: {}", e),
        }
        info!("MQTT: Reconnecting in {}s...", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
    }
}

/// Verbindet mit dem Gateway-Broker und leitet Nachrichten weiter
///
/// 1. DNS-Auflösung des Broker-Hostnames
/// 2. TCP-Verbindung + MQTT CONNECT
/// 3. Subscribe auf Provisioning-, Command- und Preset-Topic
/// 4. Schleife: eingehende Nachrichten, Status-Antworten, Keep-Alive
async fn mqtt_connect_and_bridge(
    stack: &'static Stack<'static>,
    events: &MeshEventSender,
    replies: &StatusReplyReceiver,
) -> Result<(), MqttError> {
    info!("MQTT: Resolving '{}'...", MQTT_BROKER);
    let broker_ip = resolve_hostname(stack, MQTT_BROKER).await?;
    info!("MQTT: Resolved to {}", Debug2Format(&broker_ip));

    let mut rx_buffer = [0u8; MQTT_TCP_BUFFER_SIZE];
    let mut tx_buffer = [0u8; MQTT_TCP_BUFFER_SIZE];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    // Broker trennt nach 1.5 × Keep-Alive ohne Pakete
    socket.set_timeout(Some(Duration::from_secs(MQTT_KEEP_ALIVE_SECS as u64 * 3 / 2)));

    socket
        .connect((broker_ip, MQTT_PORT))
        .await
        .map_err(|_| MqttError::ConnectionFailed)?;
    info!("MQTT: TCP connected");

    let rng = CountingRng(20000);
    let mut config = ClientConfig::<5, _>::new(MqttVersion::MQTTv5, rng);
    config.client_id = EncodedString {
        string: MQTT_CLIENT_ID,
        len: MQTT_CLIENT_ID.len() as u16,
    };
    config.keep_alive = MQTT_KEEP_ALIVE_SECS;
    config.max_packet_size = MQTT_BUFFER_SIZE as u32;

    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];

    let mut client = MqttClient::<_, 5, _>::new(
        socket,
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        config,
    );

    client
        .connect_to_broker()
        .await
        .map_err(|_| MqttError::ProtocolError)?;
    info!("MQTT: Connected to broker");

    for topic in [MQTT_TOPIC_PROVISION, MQTT_TOPIC_COMMAND, MQTT_TOPIC_PRESET] {
        client
            .subscribe_to_topic(topic)
            .await
            .map_err(|_| MqttError::SubscribeFailed)?;
        info!("MQTT: Subscribed to '{}'", topic);
    }

    loop {
        let ping = Timer::after(Duration::from_secs(MQTT_PING_INTERVAL_SECS));

        match select3(client.receive_message(), replies.receive(), ping).await {
            Either3::First(received) => {
                let (topic, payload) = received.map_err(|_| MqttError::ReceiveFailed)?;
                // Ereignis kopieren, danach ist der Client wieder frei
                if let Some(event) = bridge_event(topic, payload) {
                    events.send(event).await;
                }
            }
            Either3::Second(reply) => {
                client
                    .send_message(
                        MQTT_TOPIC_STATUS,
                        &reply.encode(),
                        QualityOfService::QoS0,
                        false,
                    )
                    .await
                    .map_err(|_| MqttError::PublishFailed)?;
                info!("MQTT: Published status reply");
            }
            Either3::Third(()) => {
                client
                    .send_ping()
                    .await
                    .map_err(|_| MqttError::PingFailed)?;
                debug!("MQTT: Ping");
            }
        }
    }
}

/// Übersetzt eine Gateway-Nachricht in ein Mesh-Ereignis
///
/// Unbrauchbare Nachrichten werden geloggt und verworfen.
fn bridge_event(topic: &str, payload: &[u8]) -> Option<MeshEvent> {
    if topic == MQTT_TOPIC_PROVISION {
        let event = MeshEvent::from_provisioning_report(payload);
        if event.is_none() {
            warn!("MQTT: Invalid provisioning report: {=[u8]}", payload);
        }
        event
    } else if topic == MQTT_TOPIC_COMMAND {
        match MeshEvent::message(payload) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("MQTT: Message dropped: {}", e);
                None
            }
        }
    } else if topic == MQTT_TOPIC_PRESET {
        let event = MeshEvent::from_preset(payload);
        if event.is_none() {
            warn!("MQTT: Unknown color preset: {=[u8]}", payload);
        }
        event
    } else {
        debug!("MQTT: Ignoring message on '{}'", topic);
        None
    }
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// Nutzt embassy-net DNS-Stack mit konfigurierbarem Timeout.
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, MqttError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => {
            for addr in addrs {
                if let IpAddress::Ipv4(ipv4) = addr {
                    return Ok(ipv4);
                }
            }
            Err(MqttError::DnsResolutionFailed)
        }
        Ok(Err(_)) => Err(MqttError::DnsResolutionFailed),
        Err(_) => Err(MqttError::DnsTimeout),
    }
}

/// MQTT Fehler-Typen
///
/// Alle möglichen Fehler die während der Bridge-Verbindung auftreten können.
#[derive(Debug)]
enum MqttError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError,
    SubscribeFailed,
    ReceiveFailed,
    PublishFailed,
    PingFailed,
}

impl defmt::Format for MqttError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MqttError::DnsResolutionFailed => defmt::write!(fmt, "DNS failed"),
            MqttError::DnsTimeout => defmt::write!(fmt, "DNS timeout"),
            MqttError::ConnectionFailed => defmt::write!(fmt, "Connection failed"),
            MqttError::ProtocolError => defmt::write!(fmt, "Protocol error"),
            MqttError::SubscribeFailed => defmt::write!(fmt, "Subscribe failed"),
            MqttError::ReceiveFailed => defmt::write!(fmt, "Receive failed"),
            MqttError::PublishFailed => defmt::write!(fmt, "Publish failed"),
            MqttError::PingFailed => defmt::write!(fmt, "Ping failed"),
        }
    }
}
