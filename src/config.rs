use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::Value;

/// Client configuration produced from the module's construction arguments.
///
/// Built once by [`ClientConfig::from_args`], handed to the engine starter,
/// then immutable for the instance's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Interface to run the DHCP client on. Must already be administratively up.
    pub interface: String,
    /// Hostname to send to the DHCP server, if any.
    pub hostname: Option<String>,
    /// Vendor class identifier to send, if any.
    pub vendor_class_id: Option<String>,
    /// Derive the DHCP client identifier from the interface's MAC address
    /// instead of the protocol default.
    pub auto_client_id: bool,
}

impl ClientConfig {
    /// Parses the module's positional arguments: `(ifname [, opts])`.
    ///
    /// `opts` is a flat token list read left to right. `"hostname"` and
    /// `"vendorclassid"` each consume the following token as their string
    /// value; `"auto_clientid"` stands alone. A repeated option overwrites
    /// the earlier occurrence.
    pub fn from_args(args: &[Value]) -> Result<Self> {
        let (ifname, opts) = match args {
            [ifname] => (ifname, None),
            [ifname, opts] => (ifname, Some(opts)),
            _ => return Err(Error::WrongArity(args.len())),
        };

        let interface = ifname
            .as_str_no_nulls()
            .filter(|name| !name.is_empty())
            .ok_or(Error::WrongType("ifname must be a non-empty string"))?
            .to_string();

        let mut config = Self {
            interface,
            hostname: None,
            vendor_class_id: None,
            auto_client_id: false,
        };

        let Some(opts) = opts else {
            return Ok(config);
        };
        let tokens = opts.as_list().ok_or(Error::WrongType("opts must be a list"))?;

        let mut index = 0;
        while index < tokens.len() {
            let name = tokens[index]
                .as_str_no_nulls()
                .ok_or(Error::WrongOptionNameType(index))?;

            match name {
                "hostname" | "vendorclassid" => {
                    let value = tokens
                        .get(index + 1)
                        .ok_or_else(|| Error::MissingOptionValue(name.to_string()))?
                        .as_str_no_nulls()
                        .ok_or(Error::WrongType("option value must be a string"))?
                        .to_string();

                    if name == "hostname" {
                        config.hostname = Some(value);
                    } else {
                        config.vendor_class_id = Some(value);
                    }
                    index += 2;
                }
                "auto_clientid" => {
                    config.auto_client_id = true;
                    index += 1;
                }
                _ => return Err(Error::UnknownOption(name.to_string())),
            }
        }

        Ok(config)
    }
}
