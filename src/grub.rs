//! GRUB boot menu for the ISO.

use std::fs;
use std::io;
use std::path::Path;

/// Boot menu written to `isofiles/boot/grub/grub.cfg`.
///
/// The multiboot2 path must match where make-iso stages the binary.
pub const GRUB_CFG: &str = r#"menuentry "AxiomOS" {
    multiboot2 /boot/bootloader
    boot
}
"#;

/// Write the boot menu, replacing whatever is at `path`.
pub fn write_grub_cfg(path: &Path) -> io::Result<()> {
    fs::write(path, GRUB_CFG)
}
