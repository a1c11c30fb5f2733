// Vault Mount Constants

// Volume label used when the configuration names none
pub const DEFAULT_VOLUME_NAME: &str = "vault";

// Provider daemon that serves the vault filesystem; resolved via PATH
// unless the config points at a concrete binary
pub const DEFAULT_MOUNT_PROGRAM: &str = "vaultfs";

// Default location of the settings file
pub const CONFIG_FILE: &str = "/etc/vault-mount/config.toml";
