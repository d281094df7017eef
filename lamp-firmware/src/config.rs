// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

// ============================================================================
// PWM Konfiguration (LEDC)
// ============================================================================
//
// Kanal-Zuordnung (siehe bin/main.rs):
//   Rot   → GPIO4 → LEDC Channel0
//   Grün  → GPIO5 → LEDC Channel1
//   Blau  → GPIO6 → LEDC Channel2

/// PWM-Frequenz in kHz
/// 24 kHz liegt oberhalb des hörbaren Bereichs und flackert nicht
pub const PWM_FREQUENCY_KHZ: u32 = 24;

// ============================================================================
// Lampen-Task Konfiguration
// ============================================================================

/// Kapazität der Event-Queue (Bridge → Lampen-Task)
/// Der Lampen-Task arbeitet Events schneller ab als MQTT sie liefert
pub const MESH_EVENT_QUEUE_DEPTH: usize = 4;

/// Kapazität der Antwort-Queue (Lampen-Task → Bridge)
pub const STATUS_REPLY_QUEUE_DEPTH: usize = 2;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach WiFi-Fehler vor erneutem Versuch
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// Mesh-Bridge (MQTT) Konfiguration
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse des Mesh-Gateways
pub const MQTT_BROKER: &str = env!(
    "MQTT_BROKER",
    "MQTT Broker nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port (unverschlüsselt)
pub const MQTT_PORT: u16 = 1883;

/// MQTT Client ID
/// Eindeutige Kennung für diese Lampe
pub const MQTT_CLIENT_ID: &str = env!(
    "MQTT_CLIENT_ID",
    "MQTT Client ID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Topic für Anwendungs-Nachrichten (Opcode + Payload, binär)
pub const MQTT_TOPIC_COMMAND: &str = env!(
    "MQTT_TOPIC_COMMAND",
    "MQTT Topic Command nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Topic für Provisioning-Reports des Gateways
pub const MQTT_TOPIC_PROVISION: &str = env!(
    "MQTT_TOPIC_PROVISION",
    "MQTT Topic Provision nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Topic für Farb-Presets ("red", "green", "purple" als UTF-8 Text)
pub const MQTT_TOPIC_PRESET: &str = env!(
    "MQTT_TOPIC_PRESET",
    "MQTT Topic Preset nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Topic für Status-Antworten (5 Bytes, siehe StatusReply)
pub const MQTT_TOPIC_STATUS: &str = env!(
    "MQTT_TOPIC_STATUS",
    "MQTT Topic Status nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Keep-Alive in Sekunden
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// Intervall für PINGREQ (deutlich unter Keep-Alive)
pub const MQTT_PING_INTERVAL_SECS: u64 = 20;

/// MQTT Reconnect Delay in Sekunden
/// Wartezeit nach Verbindungsfehler vor erneutem Versuch
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Buffer-Größe in Bytes
/// Muss eine komplette Access-Nachricht plus Topic aufnehmen
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// TCP Buffer-Größe für die Broker-Verbindung
pub const MQTT_TCP_BUFFER_SIZE: usize = 4096;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;
