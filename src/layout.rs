/// ILC firmware memory map, mirroring the constants of the firmware sources.
///
/// System words and statistics addresses are word addresses as seen by
/// [`crate::AddressSpace::read_word16`].
pub struct MemoryLayout;

impl MemoryLayout {
    /// System status word
    pub const SYS_STATUS_ADDR: u32 = 0x0F00;
    /// System flags word
    pub const SYS_FLAGS_ADDR: u32 = 0x0F02;
    /// MODBUS flags word
    pub const MB_FLAGS_ADDR: u32 = 0x0F04;
    /// System fault word
    pub const SYS_FAULT_ADDR: u32 = 0x0F06;
    /// Reset command
    pub const RESET_CMD_ADDR: u32 = 0x0F08;
    /// Last MODBUS function before reset
    pub const MBFUNC_ADDR: u32 = 0x0F0A;
    /// Event code
    pub const EVENT_ADDR: u32 = 0x0F0C;
    /// MODBUS serial diagnostic counters
    pub const MB_DIAGCTR_ADDR: u32 = 0x0F10;

    /// Failed address
    pub const ADDR_DEFAULT: u32 = 0x00_0000;
    /// End of usable code space
    pub const CODE_ADDR_MAX: u32 = 0x00_57FE;
    /// Start of the last programmable code page
    pub const CODE_ADDR_LAST_PAGE: u32 = 0x00_57C0;

    /// Beginning of user code space
    pub const APP_ADDR_MIN: u32 = 0x00_1600;
    /// User application reset vector
    pub const APP_ADDR_START_VECTOR: u32 = 0x00_1800;
    /// User application default start address
    pub const APP_ADDR_START: u32 = 0x00_1810;
    /// Start of the last programmable application page
    pub const APP_ADDR_LAST_PAGE: u32 = 0x00_5780;
    /// Bootloader protection area
    pub const BL_ADDR_START: u32 = 0x00_0200;
    pub const BL_ADDR_END: u32 = 0x00_15FE;

    /// Maximal application firmware length
    pub const APP_MAX_LEN: u32 = Self::CODE_ADDR_MAX - Self::APP_ADDR_MIN + 2;
    /// Instruction pages of application firmware
    pub const APP_MAX_PAGE_LEN: u32 = Self::APP_MAX_LEN / 64;

    // Statistics words are contiguous: application CRC, application start,
    // application length, then the CRC of the three preceding entries.
    pub const STAT_ADDR_START: u32 = 0x00_57C0;
    pub const STAT_ADDR_APP_CRC: u32 = 0x00_57C0;
    pub const STAT_ADDR_APP_START: u32 = 0x00_57C2;
    pub const STAT_ADDR_APP_LEN: u32 = 0x00_57C4;
    pub const STAT_ADDR_STAT_CRC: u32 = 0x00_57C6;

    /// Instruction length of the statistics covered by the statistics CRC
    pub const STAT_LEN: u32 = 3;
    /// Bytes that must be loaded at `STAT_ADDR_START` before verification
    pub const STAT_RECORD_LEN: u32 = 16;
    /// Bytes summed by the statistics CRC
    pub const STAT_CRC_LEN: u32 = 12;

    /// Interrupt vector table, word address (byte address 0x2C00)
    pub const IVT_BASE: u32 = 0x1600;
}
