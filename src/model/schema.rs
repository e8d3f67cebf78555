//! Static per-kind property schemas
//!
//! Every object kind has a fixed, ordered list of the properties Nagios knows
//! for it. The list drives classification (each field gets a slot up front)
//! and the emitter's key order.

use std::fmt;

/// Properties that identify a template rather than describe an object.
/// They never propagate from a template to its users.
pub const IDENTITY_PROPERTIES: &[&str] = &["name", "use", "register"];

/// Whether a property may be inherited from a template
pub fn is_transferable(key: &str) -> bool {
    !IDENTITY_PROPERTIES.contains(&key)
}

/// Kind of object, keyed by the tag on its `define` line
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Host,
    Service,
    ServiceGroup,
    Contact,
    Command,
    TimePeriod,
    ServiceEscalation,
    HostGroup,
    HostExtInfo,
    HostEscalation,
    ContactGroup,
    /// Unrecognised tag; open schema
    Custom(String),
}

impl ObjectKind {
    /// Dispatch a type tag to its kind
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "host" => ObjectKind::Host,
            "service" => ObjectKind::Service,
            "servicegroup" => ObjectKind::ServiceGroup,
            "contact" => ObjectKind::Contact,
            "command" => ObjectKind::Command,
            "timeperiod" => ObjectKind::TimePeriod,
            "serviceescalation" => ObjectKind::ServiceEscalation,
            "hostgroup" => ObjectKind::HostGroup,
            "hostextinfo" => ObjectKind::HostExtInfo,
            "hostescalation" => ObjectKind::HostEscalation,
            "contactgroup" => ObjectKind::ContactGroup,
            other => ObjectKind::Custom(other.to_string()),
        }
    }

    /// The tag written on the `define` line
    pub fn tag(&self) -> &str {
        match self {
            ObjectKind::Host => "host",
            ObjectKind::Service => "service",
            ObjectKind::ServiceGroup => "servicegroup",
            ObjectKind::Contact => "contact",
            ObjectKind::Command => "command",
            ObjectKind::TimePeriod => "timeperiod",
            ObjectKind::ServiceEscalation => "serviceescalation",
            ObjectKind::HostGroup => "hostgroup",
            ObjectKind::HostExtInfo => "hostextinfo",
            ObjectKind::HostEscalation => "hostescalation",
            ObjectKind::ContactGroup => "contactgroup",
            ObjectKind::Custom(tag) => tag,
        }
    }

    /// Whether the tag matched a known kind
    pub fn is_classified(&self) -> bool {
        !matches!(self, ObjectKind::Custom(_))
    }

    /// Whether the kind accepts keys outside its field list.
    ///
    /// Time periods carry weekday and date-exception lines whose keys are
    /// data, so they are open like custom kinds.
    pub fn is_open(&self) -> bool {
        matches!(self, ObjectKind::TimePeriod | ObjectKind::Custom(_))
    }

    /// Whether `key` is one of this kind's declared fields
    pub fn has_field(&self, key: &str) -> bool {
        self.fields().contains(&key)
    }

    /// Known Nagios fields, in emission order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ObjectKind::Host => HOST_FIELDS,
            ObjectKind::Service => SERVICE_FIELDS,
            ObjectKind::ServiceGroup => SERVICEGROUP_FIELDS,
            ObjectKind::Contact => CONTACT_FIELDS,
            ObjectKind::Command => COMMAND_FIELDS,
            ObjectKind::TimePeriod => TIMEPERIOD_FIELDS,
            ObjectKind::ServiceEscalation => SERVICEESCALATION_FIELDS,
            ObjectKind::HostGroup => HOSTGROUP_FIELDS,
            ObjectKind::HostExtInfo => HOSTEXTINFO_FIELDS,
            ObjectKind::HostEscalation => HOSTESCALATION_FIELDS,
            ObjectKind::ContactGroup => CONTACTGROUP_FIELDS,
            ObjectKind::Custom(_) => &[],
        }
    }
}

impl Default for ObjectKind {
    fn default() -> Self {
        ObjectKind::Custom(String::new())
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

const HOST_FIELDS: &[&str] = &[
    "host_name",
    "alias",
    "display_name",
    "address",
    "parents",
    "hostgroups",
    "check_command",
    "initial_state",
    "max_check_attempts",
    "check_interval",
    "retry_interval",
    "active_checks_enabled",
    "passive_checks_enabled",
    "check_period",
    "obsess_over_host",
    "check_freshness",
    "freshness_threshold",
    "event_handler",
    "event_handler_enabled",
    "low_flap_threshold",
    "high_flap_threshold",
    "flap_detection_enabled",
    "flap_detection_options",
    "process_perf_data",
    "retain_status_information",
    "retain_nonstatus_information",
    "contacts",
    "contact_groups",
    "notification_interval",
    "first_notification_delay",
    "notification_period",
    "notification_options",
    "notifications_enabled",
    "stalking_options",
    "notes",
    "notes_url",
    "action_url",
    "icon_image",
    "icon_image_alt",
    "vrml_image",
    "statusmap_image",
    "2d_coords",
    "3d_coords",
];

const SERVICE_FIELDS: &[&str] = &[
    "host_name",
    "hostgroup_name",
    "service_description",
    "display_name",
    "servicegroups",
    "is_volatile",
    "check_command",
    "initial_state",
    "max_check_attempts",
    "check_interval",
    "retry_interval",
    "normal_check_interval",
    "retry_check_interval",
    "active_checks_enabled",
    "passive_checks_enabled",
    "parallelize_check",
    "check_period",
    "obsess_over_service",
    "check_freshness",
    "freshness_threshold",
    "event_handler",
    "event_handler_enabled",
    "low_flap_threshold",
    "high_flap_threshold",
    "flap_detection_enabled",
    "flap_detection_options",
    "failure_prediction_enabled",
    "process_perf_data",
    "retain_status_information",
    "retain_nonstatus_information",
    "notification_interval",
    "first_notification_delay",
    "notification_period",
    "notification_options",
    "notifications_enabled",
    "contacts",
    "contact_groups",
    "stalking_options",
    "notes",
    "notes_url",
    "action_url",
    "icon_image",
    "icon_image_alt",
];

const SERVICEGROUP_FIELDS: &[&str] = &[
    "servicegroup_name",
    "alias",
    "members",
    "servicegroup_members",
    "notes",
    "notes_url",
    "action_url",
];

const CONTACT_FIELDS: &[&str] = &[
    "contact_name",
    "alias",
    "contactgroups",
    "host_notifications_enabled",
    "service_notifications_enabled",
    "host_notification_period",
    "service_notification_period",
    "host_notification_options",
    "service_notification_options",
    "host_notification_commands",
    "service_notification_commands",
    "email",
    "pager",
    "addressx",
    "can_submit_commands",
    "retain_status_information",
    "retain_nonstatus_information",
];

const COMMAND_FIELDS: &[&str] = &["command_name", "command_line"];

const TIMEPERIOD_FIELDS: &[&str] = &[
    "timeperiod_name",
    "alias",
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "exclude",
];

const SERVICEESCALATION_FIELDS: &[&str] = &[
    "host_name",
    "hostgroup_name",
    "service_description",
    "contacts",
    "contact_groups",
    "first_notification",
    "last_notification",
    "notification_interval",
    "escalation_period",
    "escalation_options",
];

const HOSTGROUP_FIELDS: &[&str] = &[
    "hostgroup_name",
    "alias",
    "members",
    "hostgroup_members",
    "notes",
    "notes_url",
    "action_url",
];

const HOSTEXTINFO_FIELDS: &[&str] = &[
    "host_name",
    "notes",
    "notes_url",
    "icon_image",
    "icon_image_alt",
    "vrml_image",
    "statusmap_image",
    "2d_coords",
    "3d_coords",
];

const HOSTESCALATION_FIELDS: &[&str] = &[
    "host_name",
    "hostgroup_name",
    "contacts",
    "contact_groups",
    "first_notification",
    "last_notification",
    "notification_interval",
    "escalation_period",
    "escalation_options",
];

const CONTACTGROUP_FIELDS: &[&str] = &[
    "contactgroup_name",
    "alias",
    "members",
    "contactgroup_members",
];
